pub mod device_types;
pub mod devices;
pub mod measures;
pub mod metrics;
pub mod sites;
pub mod sqlite;

pub use device_types::DeviceTypeRepository;
pub use devices::DeviceRepository;
pub use measures::MeasureRepository;
pub use metrics::MetricRepository;
pub use sites::SiteRepository;
pub use sqlite::SqliteRepo;

use crate::config::Config;
use crate::db::Database;
use anyhow::Result;

pub struct Repositories {
    pub db: SqliteRepo,
}

impl Repositories {
    pub async fn new(cfg: &Config) -> Result<Self> {
        let database = Database::new(&cfg.db).await?;
        Ok(Self {
            db: SqliteRepo::new(database.pool().clone()),
        })
    }

    /// Build repositories over an existing pool. Used by tests running against
    /// an in-memory database.
    pub fn from_pool(pool: sqlx::SqlitePool) -> Self {
        Self {
            db: SqliteRepo::new(pool),
        }
    }
}
