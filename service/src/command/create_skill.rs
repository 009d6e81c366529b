//! [`Command`] for creating a new [`Skill`].

use common::operations::Insert;
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{skill, Skill},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for creating a new [`Skill`].
#[derive(Clone, Debug, From)]
pub struct CreateSkill {
    /// Contents of a new [`Skill`].
    pub draft: skill::Draft,
}

impl<Db> Command<CreateSkill> for Service<Db>
where
    Db: Database<Insert<Skill>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Skill;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: CreateSkill,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let skill = Skill::new(cmd.draft);
        self.database()
            .execute(Insert(skill.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(skill)
    }
}

/// Error of [`CreateSkill`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),
}
