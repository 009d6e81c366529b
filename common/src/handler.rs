//! [`Handler`] abstractions.

use std::future::Future;

/// Something executing an operation of `Args` type.
///
/// Commands, queries and database operations are all expressed as
/// [`Handler`]s, so a single type may handle many different operations,
/// each described by its own `Args`.
pub trait Handler<Args = ()> {
    /// Type of successful [`Handler`] result.
    type Ok;

    /// Type of this [`Handler`] error.
    type Err;

    /// Executes the operation described by the provided `args`.
    fn execute(
        &self,
        args: Args,
    ) -> impl Future<Output = Result<Self::Ok, Self::Err>>;
}
