use crate::domain::error::DomainError;
use crate::domain::model::{Money, VehicleId};
use serde::{Deserialize, Serialize};

/// 車両エンティティ
/// カタログが所有する参照データで、予約処理からは変更しない
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    id: VehicleId,
    brand: String,
    name: String,
    price: Money,
    images: Vec<String>,
}

impl Vehicle {
    /// 新しい車両を作成
    ///
    /// # Arguments
    /// * `id` - 車両ID
    /// * `brand` - ブランド名
    /// * `name` - 車種名
    /// * `price` - 1日あたりの料金（0より大きい必要がある）
    /// * `images` - 画像の参照リスト
    ///
    /// # Returns
    /// * `Ok(Vehicle)` - 作成成功
    /// * `Err(DomainError::InvalidPrice)` - 料金が0以下
    pub fn new(
        id: VehicleId,
        brand: String,
        name: String,
        price: Money,
        images: Vec<String>,
    ) -> Result<Self, DomainError> {
        if !price.is_positive() {
            return Err(DomainError::InvalidPrice(format!(
                "1日あたりの料金は0より大きい必要があります: {}",
                price.amount()
            )));
        }
        Ok(Self {
            id,
            brand,
            name,
            price,
            images,
        })
    }

    pub fn id(&self) -> &VehicleId {
        &self.id
    }

    pub fn brand(&self) -> &str {
        &self.brand
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// 1日あたりの料金を取得
    pub fn price(&self) -> Money {
        self.price
    }

    pub fn images(&self) -> &[String] {
        &self.images
    }

    /// 表示名（ブランド + 車種名）
    pub fn display_name(&self) -> String {
        format!("{} {}", self.brand, self.name)
    }

    /// 代表画像（先頭の画像）
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_vehicle_creation() {
        let vehicle = Vehicle::new(
            VehicleId::new("porsche-911").unwrap(),
            "Porsche".to_string(),
            "911 Carrera".to_string(),
            Money::eur(Decimal::from(450)),
            vec!["/images/911-front.jpg".to_string(), "/images/911-side.jpg".to_string()],
        )
        .unwrap();

        assert_eq!(vehicle.display_name(), "Porsche 911 Carrera");
        assert_eq!(vehicle.primary_image(), Some("/images/911-front.jpg"));
    }

    #[test]
    fn test_vehicle_without_images() {
        let vehicle = Vehicle::new(
            VehicleId::new("fiat-500").unwrap(),
            "Fiat".to_string(),
            "500".to_string(),
            Money::eur(Decimal::from(45)),
            Vec::new(),
        )
        .unwrap();
        assert_eq!(vehicle.primary_image(), None);
    }

    #[test]
    fn test_vehicle_rejects_non_positive_price() {
        let result = Vehicle::new(
            VehicleId::new("free-car").unwrap(),
            "Nobody".to_string(),
            "Free".to_string(),
            Money::eur(Decimal::ZERO),
            Vec::new(),
        );
        assert!(matches!(result, Err(DomainError::InvalidPrice(_))));
    }
}
