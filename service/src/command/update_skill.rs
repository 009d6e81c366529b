//! [`Command`] for updating an existing [`Skill`].

use common::operations::{
    By, Commit, Lock, Select, Transact, Transacted, Update,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{skill, Skill},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for updating an existing [`Skill`].
#[derive(Clone, Debug)]
pub struct UpdateSkill {
    /// ID of the [`Skill`] to update.
    pub id: skill::Id,

    /// New contents of the [`Skill`].
    pub draft: skill::Draft,
}

impl<Db> Command<UpdateSkill> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Select<By<Option<Skill>, skill::Id>>,
            Ok = Option<Skill>,
            Err = Traced<database::Error>,
        > + Database<
            Lock<By<Skill, skill::Id>>,
            Ok = (),
            Err = Traced<database::Error>,
        > + Database<Update<Skill>, Ok = (), Err = Traced<database::Error>>
        + Database<Commit, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Skill;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: UpdateSkill,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateSkill { id, draft } = cmd;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        // Avoid concurrent actions upon the same `Skill`.
        tx.execute(Lock(By::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let mut skill = tx
            .execute(Select(By::<Option<Skill>, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::SkillNotExists(id))
            .map_err(tracerr::wrap!())?;

        skill.apply(draft);
        tx.execute(Update(skill.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(skill)
    }
}

/// Error of [`UpdateSkill`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`Skill`] doesn't exist.
    #[display("`Skill(id: {_0})` does not exist")]
    #[from(ignore)]
    SkillNotExists(#[error(not(source))] skill::Id),
}
