use snafu::prelude::*;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    #[snafu(display("No route identified by {identity} in the navigation stack"))]
    RouteNotFound { identity: String },

    #[snafu(display("Failed to lock router: poisoned"))]
    LockPoisoned,
}

impl Error {
    /// Whether this is a `pop_to` miss, which leaves the stack untouched.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::RouteNotFound { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
