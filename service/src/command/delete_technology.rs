//! [`Command`] for deleting a [`Technology`].

use common::operations::{By, Delete};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{technology, Technology},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for deleting a [`Technology`].
///
/// Deleting a non-existent [`Technology`] succeeds.
#[derive(Clone, Copy, Debug, From)]
pub struct DeleteTechnology {
    /// ID of the [`Technology`] to delete.
    pub id: technology::Id,
}

impl<Db> Command<DeleteTechnology> for Service<Db>
where
    Db: Database<
        Delete<By<Technology, technology::Id>>,
        Ok = (),
        Err = Traced<database::Error>,
    >,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: DeleteTechnology,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        self.database()
            .execute(Delete(By::new(cmd.id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
    }
}

/// Error of [`DeleteTechnology`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),
}
