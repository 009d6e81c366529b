//! [`Command`] definition.

pub mod authorize_admin_session;
pub mod create_admin_session;
pub mod create_project;
pub mod create_skill;
pub mod create_technology;
pub mod delete_project;
pub mod delete_skill;
pub mod delete_technology;
pub mod update_profile;
pub mod update_project;
pub mod update_skill;
pub mod update_technology;

/// [`Command`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Command;

pub use self::{
    authorize_admin_session::AuthorizeAdminSession,
    create_admin_session::CreateAdminSession, create_project::CreateProject,
    create_skill::CreateSkill, create_technology::CreateTechnology,
    delete_project::DeleteProject, delete_skill::DeleteSkill,
    delete_technology::DeleteTechnology, update_profile::UpdateProfile,
    update_project::UpdateProject, update_skill::UpdateSkill,
    update_technology::UpdateTechnology,
};
