//! Seam to the external identity service that owns credentials and bearer
//! tokens. The HTTP client lives in the infrastructure crate.

mod mock;
mod traits;

pub use mock::MockIdentityService;
pub use traits::{IdentityService, TokenIntrospection};
