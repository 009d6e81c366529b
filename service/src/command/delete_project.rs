//! [`Command`] for deleting a [`Project`].

use common::operations::{By, Delete};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{project, Project},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for deleting a [`Project`].
///
/// Deleting a non-existent [`Project`] succeeds.
#[derive(Clone, Copy, Debug, From)]
pub struct DeleteProject {
    /// ID of the [`Project`] to delete.
    pub id: project::Id,
}

impl<Db> Command<DeleteProject> for Service<Db>
where
    Db: Database<
        Delete<By<Project, project::Id>>,
        Ok = (),
        Err = Traced<database::Error>,
    >,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: DeleteProject,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        self.database()
            .execute(Delete(By::new(cmd.id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
    }
}

/// Error of [`DeleteProject`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),
}
