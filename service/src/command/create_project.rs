//! [`Command`] for creating a new [`Project`].

use common::operations::Insert;
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{project, Project},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for creating a new [`Project`].
#[derive(Clone, Debug, From)]
pub struct CreateProject {
    /// Contents of a new [`Project`].
    pub draft: project::Draft,
}

impl<Db> Command<CreateProject> for Service<Db>
where
    Db: Database<Insert<Project>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Project;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: CreateProject,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let project = Project::new(cmd.draft);
        self.database()
            .execute(Insert(project.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(project)
    }
}

/// Error of [`CreateProject`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),
}
