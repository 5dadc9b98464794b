pub mod portal;

pub use portal::{use_portal, AdminContext, CitizenContext, PortalApi, PortalContext};
