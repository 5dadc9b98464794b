pub mod admin_api;
pub mod api_client;
pub mod citizen_api;
pub mod query_cache;
pub mod transport;

pub use admin_api::{AdminApi, AreaFilter, ReportFilter};
pub use api_client::ApiClient;
pub use citizen_api::{CitizenApi, SubmitError};
pub use query_cache::{QueryClient, QueryEvent, QueryKey, QueryOptions, QuerySubscription};
pub use transport::{FetchTransport, HttpMethod, HttpTransport, RequestBody};
