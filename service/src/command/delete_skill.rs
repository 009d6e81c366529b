//! [`Command`] for deleting a [`Skill`].

use common::operations::{By, Delete};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{skill, Skill},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for deleting a [`Skill`].
///
/// Deleting a non-existent [`Skill`] succeeds.
#[derive(Clone, Copy, Debug, From)]
pub struct DeleteSkill {
    /// ID of the [`Skill`] to delete.
    pub id: skill::Id,
}

impl<Db> Command<DeleteSkill> for Service<Db>
where
    Db: Database<
        Delete<By<Skill, skill::Id>>,
        Ok = (),
        Err = Traced<database::Error>,
    >,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: DeleteSkill,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        self.database()
            .execute(Delete(By::new(cmd.id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
    }
}

/// Error of [`DeleteSkill`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),
}
