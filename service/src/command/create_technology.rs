//! [`Command`] for creating a new [`Technology`].

use common::operations::Insert;
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{technology, Technology},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for creating a new [`Technology`].
#[derive(Clone, Debug, From)]
pub struct CreateTechnology {
    /// Contents of a new [`Technology`].
    pub draft: technology::Draft,
}

impl<Db> Command<CreateTechnology> for Service<Db>
where
    Db: Database<Insert<Technology>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Technology;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: CreateTechnology,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let technology = Technology::new(cmd.draft);
        self.database()
            .execute(Insert(technology.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(technology)
    }
}

/// Error of [`CreateTechnology`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),
}
