use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use crate::server_record::{CreatedServer, NewServer, ServerRecord};
use crate::server_repository::{
    server_repository::ServerRepository, server_repository_error::ServerRepositoryError,
};

const LIST_ACTIVE: &str = "
    SELECT id, name, country, city, ip_address, port,
           latitude, longitude, config_type, is_active,
           ping_ms, bandwidth_mbps, current_users, max_users
    FROM vpn_servers
    WHERE is_active = true
    ORDER BY ping_ms ASC NULLS LAST";

const LIST_ALL: &str = "
    SELECT id, name, country, city, ip_address, port,
           latitude, longitude, config_type, is_active,
           ping_ms, bandwidth_mbps, current_users, max_users,
           created_at, updated_at
    FROM vpn_servers
    ORDER BY created_at DESC";

const LIST_SELECTABLE: &str = "
    SELECT id, name, country, city, ip_address, port,
           latitude, longitude, config_data, config_type, is_active,
           ping_ms, bandwidth_mbps, current_users, max_users
    FROM vpn_servers
    WHERE is_active = true
      AND current_users < max_users
      AND latitude IS NOT NULL
      AND longitude IS NOT NULL";

const INSERT: &str = "
    INSERT INTO vpn_servers
        (name, country, city, ip_address, port, latitude, longitude,
         config_type, config_data, ssh_host, ssh_port, ssh_user,
         ping_ms, bandwidth_mbps, max_users)
    VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
    RETURNING id, name, country, ip_address";

const DEACTIVATE: &str =
    "UPDATE vpn_servers SET is_active = false, updated_at = NOW() WHERE id = $1";

/// Every call checks a connection out of the pool and hands it back when the
/// call returns, error paths included.
#[derive(Clone)]
pub struct PostgresServerRepository {
    pool: PgPool,
}

impl PostgresServerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Builds the pool without opening a connection.
    pub fn connect_lazy(
        database_url: &str,
        max_connections: u32,
    ) -> Result<Self, ServerRepositoryError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect_lazy(database_url)?;

        Ok(Self::new(pool))
    }

    pub async fn migrate(&self) -> Result<(), ServerRepositoryError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;

        Ok(())
    }

    async fn fetch_servers(&self, query: &str) -> Result<Vec<ServerRecord>, ServerRepositoryError> {
        let mut connection = self.pool.acquire().await?;

        let servers = sqlx::query_as::<_, ServerRecord>(query)
            .fetch_all(&mut *connection)
            .await?;

        Ok(servers)
    }
}

#[async_trait]
impl ServerRepository for PostgresServerRepository {
    async fn list_active(&self) -> Result<Vec<ServerRecord>, ServerRepositoryError> {
        self.fetch_servers(LIST_ACTIVE).await
    }

    async fn list_all(&self) -> Result<Vec<ServerRecord>, ServerRepositoryError> {
        self.fetch_servers(LIST_ALL).await
    }

    async fn list_selectable(&self) -> Result<Vec<ServerRecord>, ServerRepositoryError> {
        self.fetch_servers(LIST_SELECTABLE).await
    }

    async fn insert(&self, server: NewServer) -> Result<CreatedServer, ServerRepositoryError> {
        let mut connection = self.pool.acquire().await?;

        let created = sqlx::query_as::<_, CreatedServer>(INSERT)
            .bind(&server.name)
            .bind(&server.country)
            .bind(&server.city)
            .bind(&server.ip_address)
            .bind(server.port())
            .bind(server.latitude)
            .bind(server.longitude)
            .bind(server.config_type())
            .bind(&server.config_data)
            .bind(&server.ssh_host)
            .bind(server.ssh_port())
            .bind(&server.ssh_user)
            .bind(server.ping_ms)
            .bind(server.bandwidth_mbps)
            .bind(server.max_users())
            .fetch_one(&mut *connection)
            .await?;

        Ok(created)
    }

    async fn deactivate(&self, id: i32) -> Result<u64, ServerRepositoryError> {
        let mut connection = self.pool.acquire().await?;

        let result = sqlx::query(DEACTIVATE)
            .bind(id)
            .execute(&mut *connection)
            .await?;

        Ok(result.rows_affected())
    }
}
