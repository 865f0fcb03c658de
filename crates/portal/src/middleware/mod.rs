pub mod guard;
pub mod portal;
pub mod redirect;

pub use self::guard::{GuardOutcome, NavigationRequest, RouteGuard};
pub use self::portal::{LoginPortal, LoginSurface, PortalOutcome};
pub use self::redirect::{Decision, area_roles, resolve};
