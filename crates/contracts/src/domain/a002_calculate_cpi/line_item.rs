use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::aggregate::CalculationRequest;
use crate::domain::a001_category::Category;

/// Тело запроса на изменение суммы расходов по категории
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLineItemBody {
    pub user_spent: f64,
}

/// Сумма расходов отрицательна или не является конечным числом
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("Сумма расходов должна быть неотрицательным числом, получено {0}")]
pub struct InvalidSpend(pub f64);

impl UpdateLineItemBody {
    pub fn new(amount: f64) -> Result<Self, InvalidSpend> {
        if amount.is_finite() && amount >= 0.0 {
            Ok(Self { user_spent: amount })
        } else {
            Err(InvalidSpend(amount))
        }
    }

    /// Разбор суммы из текстового поля ввода
    pub fn parse(input: &str) -> Result<Self, InvalidSpend> {
        let amount = input
            .trim()
            .replace(',', ".")
            .parse::<f64>()
            .map_err(|_| InvalidSpend(f64::NAN))?;
        Self::new(amount)
    }
}

/// Обёртка, которую бэкенд возвращает при изменении позиции
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemEnvelope {
    #[serde(default)]
    pub calculate_cpi: Option<CalculationRequest>,

    #[serde(default)]
    pub category: Option<Category>,

    #[serde(default)]
    pub user_spent: Option<f64>,

    #[serde(default)]
    pub coefficient: Option<f64>,
}

/// Ответ на изменение позиции: либо сам расчёт, либо обёртка,
/// в которой расчёт может отсутствовать
#[derive(Debug, Clone, PartialEq)]
pub enum LineItemUpdate {
    Request(CalculationRequest),
    Envelope(LineItemEnvelope),
}

impl LineItemUpdate {
    /// Обновлённый расчёт, если ответ его содержит
    pub fn into_parent(self) -> Option<CalculationRequest> {
        match self {
            LineItemUpdate::Request(request) => Some(request),
            LineItemUpdate::Envelope(envelope) => envelope.calculate_cpi,
        }
    }
}

impl<'de> Deserialize<'de> for LineItemUpdate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        let is_envelope = value.get("calculateCpi").is_some()
            || value.get("category").is_some()
            || value.get("status").is_none();

        if is_envelope {
            LineItemEnvelope::deserialize(value)
                .map(LineItemUpdate::Envelope)
                .map_err(de::Error::custom)
        } else {
            CalculationRequest::deserialize(value)
                .map(LineItemUpdate::Request)
                .map_err(de::Error::custom)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::RequestStatus;

    #[test]
    fn test_spend_validation() {
        assert!(UpdateLineItemBody::new(0.0).is_ok());
        assert!(UpdateLineItemBody::new(150.5).is_ok());
        assert!(UpdateLineItemBody::new(-0.01).is_err());
        assert!(UpdateLineItemBody::new(f64::NAN).is_err());
        assert!(UpdateLineItemBody::new(f64::INFINITY).is_err());
    }

    #[test]
    fn test_spend_parse() {
        assert_eq!(UpdateLineItemBody::parse(" 12,5 ").unwrap().user_spent, 12.5);
        assert!(UpdateLineItemBody::parse("abc").is_err());
        assert!(UpdateLineItemBody::parse("-3").is_err());
    }

    #[test]
    fn test_body_wire_format() {
        let body = UpdateLineItemBody::new(150.5).unwrap();
        assert_eq!(serde_json::to_string(&body).unwrap(), r#"{"userSpent":150.5}"#);
    }

    #[test]
    fn test_envelope_with_parent() {
        let json = r#"{"calculateCpi":{"id":42,"status":"DRAFT"},"userSpent":150.5}"#;
        let update: LineItemUpdate = serde_json::from_str(json).unwrap();
        let parent = update.into_parent().unwrap();
        assert_eq!(parent.id, Some(42));
    }

    #[test]
    fn test_envelope_without_parent() {
        let json = r#"{"category":{"id":7,"title":"Связь"},"userSpent":150.5,"coefficient":1.2}"#;
        let update: LineItemUpdate = serde_json::from_str(json).unwrap();
        assert!(matches!(update, LineItemUpdate::Envelope(_)));
        assert!(update.into_parent().is_none());
    }

    #[test]
    fn test_bare_request() {
        let json = r#"{"id":42,"status":"DRAFT","categories":[]}"#;
        let update: LineItemUpdate = serde_json::from_str(json).unwrap();
        match update {
            LineItemUpdate::Request(request) => assert_eq!(request.status, RequestStatus::Draft),
            other => panic!("unexpected {:?}", other),
        }
    }
}
