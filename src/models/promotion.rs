use chrono::NaiveDateTime;
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::promotion::{
    NewPromotion as DomainNewPromotion, Promotion as DomainPromotion, PromotionScope,
    PromotionType,
};
use crate::domain::validation::{ValidationError, ValidationResult};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::promotions)]
#[diesel(primary_key(promotion_id))]
pub struct Promotion {
    pub promotion_id: i32,
    pub promotion_name: String,
    pub promotion_description: String,
    pub promotion_type: String,
    pub promotion_scope: String,
    pub start_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
    pub promotion_value: f64,
    pub promotion_code: Option<String>,
    pub created_by: String,
    pub modified_by: Option<String>,
    pub created_when: NaiveDateTime,
    pub modified_when: Option<NaiveDateTime>,
    pub active: bool,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::promotions)]
pub struct NewPromotion<'a> {
    pub promotion_name: &'a str,
    pub promotion_description: &'a str,
    pub promotion_type: &'a str,
    pub promotion_scope: &'a str,
    pub start_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
    pub promotion_value: f64,
    pub promotion_code: Option<&'a str>,
    pub created_by: String,
    pub modified_by: Option<String>,
    pub created_when: NaiveDateTime,
    pub modified_when: Option<NaiveDateTime>,
    pub active: bool,
}

/// Full-row replacement; nullable columns are written as `NULL` when the domain value is `None`.
#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::promotions)]
#[diesel(treat_none_as_null = true)]
pub struct ReplacePromotion<'a> {
    pub promotion_name: &'a str,
    pub promotion_description: &'a str,
    pub promotion_type: &'a str,
    pub promotion_scope: &'a str,
    pub start_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
    pub promotion_value: f64,
    pub promotion_code: Option<&'a str>,
    pub created_by: String,
    pub modified_by: Option<String>,
    pub created_when: NaiveDateTime,
    pub modified_when: Option<NaiveDateTime>,
    pub active: bool,
}

fn parse_uuid(field: &'static str, raw: &str) -> ValidationResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| ValidationError::InvalidUuid {
        field,
        value: raw.to_string(),
    })
}

impl TryFrom<Promotion> for DomainPromotion {
    type Error = ValidationError;

    fn try_from(value: Promotion) -> Result<Self, Self::Error> {
        Ok(Self {
            promotion_id: value.promotion_id,
            promotion_type: PromotionType::parse(&value.promotion_type)?,
            promotion_scope: PromotionScope::parse(&value.promotion_scope)?,
            created_by: parse_uuid("created_by", &value.created_by)?,
            modified_by: value
                .modified_by
                .as_deref()
                .map(|raw| parse_uuid("modified_by", raw))
                .transpose()?,
            promotion_name: value.promotion_name,
            promotion_description: value.promotion_description,
            start_date: value.start_date,
            end_date: value.end_date,
            promotion_value: value.promotion_value,
            promotion_code: value.promotion_code,
            created_when: value.created_when,
            modified_when: value.modified_when,
            active: value.active,
        })
    }
}

impl<'a> From<&'a DomainNewPromotion> for NewPromotion<'a> {
    fn from(value: &'a DomainNewPromotion) -> Self {
        Self {
            promotion_name: value.promotion_name.as_str(),
            promotion_description: value.promotion_description.as_str(),
            promotion_type: value.promotion_type.as_str(),
            promotion_scope: value.promotion_scope.as_str(),
            start_date: value.start_date,
            end_date: value.end_date,
            promotion_value: value.promotion_value,
            promotion_code: value.promotion_code.as_deref(),
            created_by: value.created_by.to_string(),
            modified_by: value.modified_by.map(|uuid| uuid.to_string()),
            created_when: value.created_when,
            modified_when: value.modified_when,
            active: value.active,
        }
    }
}

impl<'a> From<&'a DomainPromotion> for ReplacePromotion<'a> {
    fn from(value: &'a DomainPromotion) -> Self {
        Self {
            promotion_name: value.promotion_name.as_str(),
            promotion_description: value.promotion_description.as_str(),
            promotion_type: value.promotion_type.as_str(),
            promotion_scope: value.promotion_scope.as_str(),
            start_date: value.start_date,
            end_date: value.end_date,
            promotion_value: value.promotion_value,
            promotion_code: value.promotion_code.as_deref(),
            created_by: value.created_by.to_string(),
            modified_by: value.modified_by.map(|uuid| uuid.to_string()),
            created_when: value.created_when,
            modified_when: value.modified_when,
            active: value.active,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn row() -> Promotion {
        let instant = NaiveDate::from_ymd_opt(2025, 1, 1)
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .expect("valid timestamp");
        Promotion {
            promotion_id: 7,
            promotion_name: "Bulk".to_string(),
            promotion_description: "Bulk discount".to_string(),
            promotion_type: "ABSOLUTE".to_string(),
            promotion_scope: "PRODUCT_ID".to_string(),
            start_date: instant,
            end_date: instant,
            promotion_value: 3.5,
            promotion_code: None,
            created_by: Uuid::nil().to_string(),
            modified_by: None,
            created_when: instant,
            modified_when: None,
            active: true,
        }
    }

    #[test]
    fn row_decodes_into_domain() {
        let promotion = DomainPromotion::try_from(row()).expect("row should decode");

        assert_eq!(promotion.promotion_id, 7);
        assert_eq!(promotion.promotion_type, PromotionType::Absolute);
        assert_eq!(promotion.promotion_scope, PromotionScope::ProductId);
        assert_eq!(promotion.created_by, Uuid::nil());
        assert!(promotion.active);
    }

    #[test]
    fn corrupt_row_fails_to_decode() {
        let mut corrupt = row();
        corrupt.promotion_scope = "GALAXY".to_string();

        assert!(matches!(
            DomainPromotion::try_from(corrupt),
            Err(ValidationError::InvalidEnum { .. })
        ));

        let mut corrupt = row();
        corrupt.modified_by = Some("nobody".to_string());

        assert!(matches!(
            DomainPromotion::try_from(corrupt),
            Err(ValidationError::InvalidUuid {
                field: "modified_by",
                ..
            })
        ));
    }
}
