//! Route capability and its type-erased form.
//!
//! Concrete routes implement [`Route`]. The router stores them as
//! [`AnyRoute`], which compares and hashes on the route's identity only.

pub mod any;
pub mod identity;
pub mod traits;

pub use any::AnyRoute;
pub use identity::IdentityKey;
pub use traits::Route;
