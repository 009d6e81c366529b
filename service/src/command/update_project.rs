//! [`Command`] for updating an existing [`Project`].

use common::operations::{
    By, Commit, Lock, Select, Transact, Transacted, Update,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{project, Project},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for updating an existing [`Project`].
#[derive(Clone, Debug)]
pub struct UpdateProject {
    /// ID of the [`Project`] to update.
    pub id: project::Id,

    /// New contents of the [`Project`].
    pub draft: project::Draft,
}

impl<Db> Command<UpdateProject> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Select<By<Option<Project>, project::Id>>,
            Ok = Option<Project>,
            Err = Traced<database::Error>,
        > + Database<
            Lock<By<Project, project::Id>>,
            Ok = (),
            Err = Traced<database::Error>,
        > + Database<Update<Project>, Ok = (), Err = Traced<database::Error>>
        + Database<Commit, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Project;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: UpdateProject,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateProject { id, draft } = cmd;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        // Avoid concurrent actions upon the same `Project`.
        tx.execute(Lock(By::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let mut project = tx
            .execute(Select(By::<Option<Project>, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::ProjectNotExists(id))
            .map_err(tracerr::wrap!())?;

        project.apply(draft);
        tx.execute(Update(project.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(project)
    }
}

/// Error of [`UpdateProject`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`Project`] doesn't exist.
    #[display("`Project(id: {_0})` does not exist")]
    #[from(ignore)]
    ProjectNotExists(#[error(not(source))] project::Id),
}
