//! [`Project`]-related [`Database`] implementations.

use common::operations::{By, Delete, Insert, Lock, Select, Update};
use tokio_postgres::Row;
use tracerr::Traced;

use crate::{
    domain::{project, Project},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
};

/// Reads a [`Project`] out of the provided [`Row`].
fn from_row(row: &Row) -> Project {
    Project {
        id: row.get("id"),
        title: row.get("title"),
        description: row.get("description"),
        image: row.get("image"),
        github_url: row.get("github_url"),
        live_url: row.get("live_url"),
        tech_stack: row.get("tech_stack"),
        featured: row.get("featured"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

impl<C> Database<Select<By<Vec<Project>, ()>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Project>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<By<Vec<Project>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        const SQL: &str = "\
            SELECT id, title, description, \
                   image, github_url, live_url, \
                   tech_stack, featured, \
                   created_at, updated_at \
            FROM projects \
            ORDER BY created_at DESC, id";
        Ok(self
            .query(SQL, &[])
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(from_row)
            .collect())
    }
}

impl<C> Database<Select<By<Option<Project>, project::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Project>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Project>, project::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();

        const SQL: &str = "\
            SELECT id, title, description, \
                   image, github_url, live_url, \
                   tech_stack, featured, \
                   created_at, updated_at \
            FROM projects \
            WHERE id = $1::UUID";
        Ok(self
            .query_opt(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())?
            .as_ref()
            .map(from_row))
    }
}

impl<C> Database<Insert<Project>> for Postgres<C>
where
    C: Connection,
    Self: Database<Update<Project>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(project): Insert<Project>,
    ) -> Result<Self::Ok, Self::Err> {
        self.execute(Update(project)).await.map_err(tracerr::wrap!())
    }
}

impl<C> Database<Update<Project>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(project): Update<Project>,
    ) -> Result<Self::Ok, Self::Err> {
        let Project {
            id,
            title,
            description,
            image,
            github_url,
            live_url,
            tech_stack,
            featured,
            created_at,
            updated_at,
        } = project;

        const SQL: &str = "\
            INSERT INTO projects (\
                id, title, description, \
                image, github_url, live_url, \
                tech_stack, featured, \
                created_at, updated_at\
            ) \
            VALUES (\
                $1::UUID, $2::VARCHAR, $3::TEXT, \
                $4::VARCHAR, $5::VARCHAR, $6::VARCHAR, \
                $7::VARCHAR[], $8::BOOLEAN, \
                $9::TIMESTAMPTZ, $10::TIMESTAMPTZ\
            ) \
            ON CONFLICT (id) DO UPDATE \
            SET title = EXCLUDED.title, \
                description = EXCLUDED.description, \
                image = EXCLUDED.image, \
                github_url = EXCLUDED.github_url, \
                live_url = EXCLUDED.live_url, \
                tech_stack = EXCLUDED.tech_stack, \
                featured = EXCLUDED.featured, \
                created_at = EXCLUDED.created_at, \
                updated_at = EXCLUDED.updated_at";
        self.exec(
            SQL,
            &[
                &id,
                &title,
                &description,
                &image,
                &github_url,
                &live_url,
                &tech_stack,
                &featured,
                &created_at,
                &updated_at,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C> Database<Lock<By<Project, project::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Lock(by): Lock<By<Project, project::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();

        const SQL: &str = "\
            SELECT id \
            FROM projects \
            WHERE id = $1::UUID \
            FOR UPDATE";
        self.query(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C> Database<Delete<By<Project, project::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Project, project::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();

        const SQL: &str = "\
            DELETE FROM projects \
            WHERE id = $1::UUID";
        self.exec(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}
