use crate::application::ApplicationError;
use crate::domain::model::{Vehicle, VehicleId};
use crate::domain::port::VehicleCatalog;
use std::sync::Arc;

/// 車両クエリサービス
/// 読み取り専用のカタログ操作を提供する
pub struct VehicleQueryService {
    catalog: Arc<dyn VehicleCatalog>,
}

impl VehicleQueryService {
    /// 新しい車両クエリサービスを作成
    ///
    /// # Arguments
    /// * `catalog` - 車両カタログ
    pub fn new(catalog: Arc<dyn VehicleCatalog>) -> Self {
        Self { catalog }
    }

    /// すべての車両を取得
    pub async fn list_vehicles(&self) -> Result<Vec<Vehicle>, ApplicationError> {
        self.catalog.find_all().await.map_err(ApplicationError::from)
    }

    /// 車両IDで車両を取得
    ///
    /// # Returns
    /// * `Ok(Vehicle)` - 車両が見つかった
    /// * `Err(ApplicationError::NotFound)` - 車両が見つからなかった
    pub async fn get_vehicle(&self, vehicle_id: &VehicleId) -> Result<Vehicle, ApplicationError> {
        self.catalog.find_by_id(vehicle_id).await?.ok_or_else(|| {
            ApplicationError::NotFound(format!("車両が見つかりません: {}", vehicle_id))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Money;
    use crate::domain::port::RepositoryError;
    use async_trait::async_trait;
    use rust_decimal::Decimal;

    // テスト用のモックカタログ
    struct MockCatalog {
        vehicles: Vec<Vehicle>,
    }

    #[async_trait]
    impl VehicleCatalog for MockCatalog {
        async fn find_by_id(
            &self,
            vehicle_id: &VehicleId,
        ) -> Result<Option<Vehicle>, RepositoryError> {
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

    fn vehicle(id: &str) -> Vehicle {
        Vehicle::new(
            VehicleId::new(id).unwrap(),
            "Toyota".to_string(),
            "Yaris".to_string(),
            Money::eur(Decimal::from(55)),
            Vec::new(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_list_vehicles() {
        let service = VehicleQueryService::new(Arc::new(MockCatalog {
            vehicles: vec![vehicle("yaris-1"), vehicle("yaris-2")],
        }));

        let vehicles = service.list_vehicles().await.unwrap();
        assert_eq!(vehicles.len(), 2);
    }

    #[tokio::test]
    async fn test_get_vehicle_not_found() {
        let service = VehicleQueryService::new(Arc::new(MockCatalog {
            vehicles: vec![vehicle("yaris-1")],
        }));

        let found = service
            .get_vehicle(&VehicleId::new("yaris-1").unwrap())
            .await
            .unwrap();
        assert_eq!(found.id().as_str(), "yaris-1");

        let missing = service.get_vehicle(&VehicleId::new("golf").unwrap()).await;
        assert!(matches!(missing, Err(ApplicationError::NotFound(_))));
    }
}
