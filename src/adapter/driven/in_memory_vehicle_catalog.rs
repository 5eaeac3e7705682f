use crate::domain::error::DomainError;
use crate::domain::model::{Money, Vehicle, VehicleId};
use crate::domain::port::{RepositoryError, VehicleCatalog};
use async_trait::async_trait;
use rust_decimal::Decimal;

/// インメモリ車両カタログ
/// 起動時に渡された車両を登録順に返す
#[derive(Clone, Default)]
pub struct InMemoryVehicleCatalog {
    vehicles: Vec<Vehicle>,
}

impl InMemoryVehicleCatalog {
    pub fn new(vehicles: Vec<Vehicle>) -> Self {
        Self { vehicles }
    }

    /// デモ用の車両一覧を登録したカタログを作成
    pub fn with_demo_fleet() -> Result<Self, DomainError> {
        let fleet = [
            ("mercedes-classe-s", "Mercedes-Benz", "Classe S", Decimal::new(35000, 2)),
            ("bmw-serie-7", "BMW", "Série 7", Decimal::new(32000, 2)),
            ("porsche-911", "Porsche", "911 Carrera", Decimal::new(45000, 2)),
            ("range-rover-sport", "Land Rover", "Range Rover Sport", Decimal::new(28000, 2)),
            ("tesla-model-s", "Tesla", "Model S", Decimal::new(24999, 2)),
        ];

        let vehicles = fleet
            .into_iter()
            .map(|(id, brand, name, price)| {
                Vehicle::new(
                    VehicleId::new(id)?,
                    brand.to_string(),
                    name.to_string(),
                    Money::eur(price),
                    vec![format!("/images/vehicles/{}.jpg", id)],
                )
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::new(vehicles))
    }
}

#[async_trait]
impl VehicleCatalog for InMemoryVehicleCatalog {
    async fn find_by_id(&self, vehicle_id: &VehicleId) -> Result<Option<Vehicle>, RepositoryError> {
        Ok(self
            .vehicles
            .iter()
            .find(|vehicle| vehicle.id() == vehicle_id)
            .cloned())
    }

    async fn find_all(&self) -> Result<Vec<Vehicle>, RepositoryError> {
        Ok(self.vehicles.clone())
    }
}
