//! [`Profile`]-related [`Database`] implementations.

use common::operations::{By, Lock, Select, Update};
use tracerr::Traced;

use crate::{
    domain::Profile,
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
};

impl<C> Database<Select<By<Option<Profile>, ()>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Profile>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<By<Option<Profile>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        const SQL: &str = "\
            SELECT id, name, bio, \
                   avatar, github, linkedin, twitter, website, \
                   email, whatsapp, phone, \
                   created_at, updated_at \
            FROM profiles \
            LIMIT 1";
        Ok(self
            .query_opt(SQL, &[])
            .await
            .map_err(tracerr::wrap!())?
            .map(|row| Profile {
                id: row.get("id"),
                name: row.get("name"),
                bio: row.get("bio"),
                avatar: row.get("avatar"),
                github: row.get("github"),
                linkedin: row.get("linkedin"),
                twitter: row.get("twitter"),
                website: row.get("website"),
                email: row.get("email"),
                whatsapp: row.get("whatsapp"),
                phone: row.get("phone"),
                created_at: row.get("created_at"),
                updated_at: row.get("updated_at"),
            }))
    }
}

impl<C> Database<Update<Profile>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(profile): Update<Profile>,
    ) -> Result<Self::Ok, Self::Err> {
        let Profile {
            id,
            name,
            bio,
            avatar,
            github,
            linkedin,
            twitter,
            website,
            email,
            whatsapp,
            phone,
            created_at,
            updated_at,
        } = profile;

        // `singleton` column keeps at most one row in the table.
        const SQL: &str = "\
            INSERT INTO profiles (\
                id, name, bio, \
                avatar, github, linkedin, twitter, website, \
                email, whatsapp, phone, \
                created_at, updated_at\
            ) \
            VALUES (\
                $1::UUID, $2::VARCHAR, $3::TEXT, \
                $4::VARCHAR, $5::VARCHAR, $6::VARCHAR, $7::VARCHAR, \
                $8::VARCHAR, \
                $9::VARCHAR, $10::VARCHAR, $11::VARCHAR, \
                $12::TIMESTAMPTZ, $13::TIMESTAMPTZ\
            ) \
            ON CONFLICT (singleton) DO UPDATE \
            SET id = EXCLUDED.id, \
                name = EXCLUDED.name, \
                bio = EXCLUDED.bio, \
                avatar = EXCLUDED.avatar, \
                github = EXCLUDED.github, \
                linkedin = EXCLUDED.linkedin, \
                twitter = EXCLUDED.twitter, \
                website = EXCLUDED.website, \
                email = EXCLUDED.email, \
                whatsapp = EXCLUDED.whatsapp, \
                phone = EXCLUDED.phone, \
                created_at = EXCLUDED.created_at, \
                updated_at = EXCLUDED.updated_at";
        self.exec(
            SQL,
            &[
                &id,
                &name,
                &bio,
                &avatar,
                &github,
                &linkedin,
                &twitter,
                &website,
                &email,
                &whatsapp,
                &phone,
                &created_at,
                &updated_at,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C> Database<Lock<By<Profile, ()>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Lock<By<Profile, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Blocks concurrent upserts, while still allowing reads.
        const SQL: &str = "LOCK TABLE profiles IN SHARE ROW EXCLUSIVE MODE";
        self.exec(SQL, &[])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}
