//! [`Command`] for updating an existing [`Technology`].

use common::operations::{
    By, Commit, Lock, Select, Transact, Transacted, Update,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{technology, Technology},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for updating an existing [`Technology`].
#[derive(Clone, Debug)]
pub struct UpdateTechnology {
    /// ID of the [`Technology`] to update.
    pub id: technology::Id,

    /// New contents of the [`Technology`].
    pub draft: technology::Draft,
}

impl<Db> Command<UpdateTechnology> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Select<By<Option<Technology>, technology::Id>>,
            Ok = Option<Technology>,
            Err = Traced<database::Error>,
        > + Database<
            Lock<By<Technology, technology::Id>>,
            Ok = (),
            Err = Traced<database::Error>,
        > + Database<Update<Technology>, Ok = (), Err = Traced<database::Error>>
        + Database<Commit, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Technology;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: UpdateTechnology,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateTechnology { id, draft } = cmd;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        // Avoid concurrent actions upon the same `Technology`.
        tx.execute(Lock(By::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let mut technology = tx
            .execute(Select(By::<Option<Technology>, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::TechnologyNotExists(id))
            .map_err(tracerr::wrap!())?;

        technology.apply(draft);
        tx.execute(Update(technology.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(technology)
    }
}

/// Error of [`UpdateTechnology`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`Technology`] doesn't exist.
    #[display("`Technology(id: {_0})` does not exist")]
    #[from(ignore)]
    TechnologyNotExists(#[error(not(source))] technology::Id),
}
