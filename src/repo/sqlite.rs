use sqlx::SqlitePool;

use super::{
    DeviceRepository, DeviceTypeRepository, MeasureRepository, MetricRepository, SiteRepository,
};

pub struct SqliteRepo {
    pub pool: SqlitePool,
}

impl SqliteRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn sites(&self) -> SiteRepository {
        SiteRepository::new(self.pool.clone())
    }

    pub fn device_types(&self) -> DeviceTypeRepository {
        DeviceTypeRepository::new(self.pool.clone())
    }

    pub fn metrics(&self) -> MetricRepository {
        MetricRepository::new(self.pool.clone())
    }

    pub fn devices(&self) -> DeviceRepository {
        DeviceRepository::new(self.pool.clone())
    }

    pub fn measures(&self) -> MeasureRepository {
        MeasureRepository::new(self.pool.clone())
    }
}
