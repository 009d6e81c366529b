//! [`Command`] for updating the [`Profile`].

use common::operations::{By, Commit, Lock, Select, Transact, Transacted, Update};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{profile, Profile},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for updating the [`Profile`], creating it if it doesn't exist
/// yet.
#[derive(Clone, Debug, From)]
pub struct UpdateProfile {
    /// New contents of the [`Profile`].
    pub draft: profile::Draft,
}

impl<Db> Command<UpdateProfile> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Lock<By<Profile, ()>>,
            Ok = (),
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Profile>, ()>>,
            Ok = Option<Profile>,
            Err = Traced<database::Error>,
        > + Database<Update<Profile>, Ok = (), Err = Traced<database::Error>>
        + Database<Commit, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Profile;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: UpdateProfile,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateProfile { draft } = cmd;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        // Avoid two concurrent requests both creating a `Profile`.
        tx.execute(Lock(By::new(())))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let profile = match tx
            .execute(Select(By::<Option<Profile>, _>::new(())))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
        {
            Some(mut profile) => {
                profile.apply(draft);
                profile
            }
            None => Profile::new(draft),
        };

        tx.execute(Update(profile.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(profile)
    }
}

/// Error of [`UpdateProfile`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),
}
