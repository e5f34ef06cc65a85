use chrono::NaiveDateTime;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::datetime;
use crate::domain::validation::{ValidationError, ValidationResult};

/// How the discount of a promotion is computed.
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PromotionType {
    /// `promotion_value` is a percentage of the price.
    Percentage,
    /// `promotion_value` is a fixed amount taken off the price.
    Absolute,
}

impl PromotionType {
    /// Every declared member, in declaration order.
    pub const ALL: [Self; 2] = [Self::Percentage, Self::Absolute];

    /// Member name as stored and serialized.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Percentage => "PERCENTAGE",
            Self::Absolute => "ABSOLUTE",
        }
    }

    /// Look a member up by name, ignoring case.
    pub fn parse(name: &str) -> ValidationResult<Self> {
        let wanted = name.trim().to_uppercase();
        Self::ALL
            .into_iter()
            .find(|member| member.as_str() == wanted)
            .ok_or_else(|| ValidationError::InvalidEnum {
                field: "promotion_type",
                value: name.to_string(),
            })
    }
}

/// What a promotion applies to.
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PromotionScope {
    /// A single product.
    ProductId,
    /// Every product of a category.
    ProductCategory,
    /// Everything in the store.
    EntireStore,
}

impl PromotionScope {
    /// Every declared member, in declaration order.
    pub const ALL: [Self; 3] = [Self::ProductId, Self::ProductCategory, Self::EntireStore];

    /// Member name as stored and serialized.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ProductId => "PRODUCT_ID",
            Self::ProductCategory => "PRODUCT_CATEGORY",
            Self::EntireStore => "ENTIRE_STORE",
        }
    }

    /// Look a member up by name, ignoring case.
    pub fn parse(name: &str) -> ValidationResult<Self> {
        let wanted = name.trim().to_uppercase();
        Self::ALL
            .into_iter()
            .find(|member| member.as_str() == wanted)
            .ok_or_else(|| ValidationError::InvalidEnum {
                field: "promotion_scope",
                value: name.to_string(),
            })
    }
}

/// Domain representation of a stored promotion.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct Promotion {
    /// Identifier assigned by the store on insert.
    pub promotion_id: i32,
    /// Short display name.
    pub promotion_name: String,
    /// Longer human-readable description.
    pub promotion_description: String,
    /// How `promotion_value` is applied.
    pub promotion_type: PromotionType,
    /// What the promotion applies to.
    pub promotion_scope: PromotionScope,
    /// First instant at which the promotion is valid.
    #[serde(serialize_with = "datetime::canonical::serialize")]
    pub start_date: NaiveDateTime,
    /// Last instant at which the promotion is valid.
    #[serde(serialize_with = "datetime::canonical::serialize")]
    pub end_date: NaiveDateTime,
    /// Discount amount, interpreted according to `promotion_type`.
    pub promotion_value: f64,
    /// Optional code customers enter at checkout.
    pub promotion_code: Option<String>,
    /// User who created the promotion.
    pub created_by: Uuid,
    /// User who last modified the promotion.
    pub modified_by: Option<Uuid>,
    /// Timestamp for when the promotion was created.
    #[serde(serialize_with = "datetime::canonical::serialize")]
    pub created_when: NaiveDateTime,
    /// Timestamp for the last modification.
    #[serde(serialize_with = "datetime::canonical_option::serialize")]
    pub modified_when: Option<NaiveDateTime>,
    /// Whether the promotion is currently switched on.
    pub active: bool,
}

impl Promotion {
    /// Whether `instant` falls inside the validity window, bounds included.
    pub fn is_valid_at(&self, instant: NaiveDateTime) -> bool {
        self.start_date <= instant && instant <= self.end_date
    }
}

/// Payload required to insert a new promotion.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPromotion {
    pub promotion_name: String,
    pub promotion_description: String,
    pub promotion_type: PromotionType,
    pub promotion_scope: PromotionScope,
    pub start_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
    pub promotion_value: f64,
    pub promotion_code: Option<String>,
    pub created_by: Uuid,
    pub modified_by: Option<Uuid>,
    pub created_when: NaiveDateTime,
    pub modified_when: Option<NaiveDateTime>,
    pub active: bool,
}

/// A single condition a promotion has to satisfy to pass a [`PromotionFilter`].
#[derive(Debug, Clone, PartialEq)]
pub enum PromotionCriterion {
    /// `start_date <= instant <= end_date`.
    ValidAt(NaiveDateTime),
    /// Scope is one of the listed members.
    ScopeIn(Vec<PromotionScope>),
    /// Type is one of the listed members.
    TypeIn(Vec<PromotionType>),
    /// Active flag equals the value.
    Active(bool),
}

impl PromotionCriterion {
    /// Evaluate the criterion against a single record.
    pub fn matches(&self, promotion: &Promotion) -> bool {
        match self {
            Self::ValidAt(instant) => promotion.is_valid_at(*instant),
            Self::ScopeIn(scopes) => scopes.contains(&promotion.promotion_scope),
            Self::TypeIn(types) => types.contains(&promotion.promotion_type),
            Self::Active(active) => promotion.active == *active,
        }
    }
}

/// Conjunction of criteria used to select promotions.
///
/// Starts out matching everything; each builder call narrows it further. Storage backends read
/// [`PromotionFilter::criteria`] to translate the same conditions into their own query language.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PromotionFilter {
    criteria: Vec<PromotionCriterion>,
}

impl PromotionFilter {
    /// A filter that matches every promotion.
    pub fn all() -> Self {
        Self::default()
    }

    /// Keep promotions whose validity window contains `instant`.
    pub fn valid_at(self, instant: NaiveDateTime) -> Self {
        self.and(PromotionCriterion::ValidAt(instant))
    }

    /// Keep promotions whose scope is one of `scopes`.
    pub fn scopes(self, scopes: impl IntoIterator<Item = PromotionScope>) -> Self {
        self.and(PromotionCriterion::ScopeIn(scopes.into_iter().collect()))
    }

    /// Keep promotions whose type is one of `types`.
    pub fn types(self, types: impl IntoIterator<Item = PromotionType>) -> Self {
        self.and(PromotionCriterion::TypeIn(types.into_iter().collect()))
    }

    /// Keep promotions whose active flag equals `active`.
    pub fn active(self, active: bool) -> Self {
        self.and(PromotionCriterion::Active(active))
    }

    /// Narrow the filter with an additional criterion.
    pub fn and(mut self, criterion: PromotionCriterion) -> Self {
        self.criteria.push(criterion);
        self
    }

    /// Criteria applied by the filter, in the order they were added.
    pub fn criteria(&self) -> &[PromotionCriterion] {
        &self.criteria
    }

    /// `true` when no criterion has been added.
    pub fn is_unconstrained(&self) -> bool {
        self.criteria.is_empty()
    }

    /// Evaluate every criterion against `promotion`.
    pub fn matches(&self, promotion: &Promotion) -> bool {
        self.criteria
            .iter()
            .all(|criterion| criterion.matches(promotion))
    }

    /// Keep the matching records, preserving their order.
    pub fn apply<I>(&self, promotions: I) -> Vec<Promotion>
    where
        I: IntoIterator<Item = Promotion>,
    {
        promotions
            .into_iter()
            .filter(|promotion| self.matches(promotion))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    fn date(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .expect("valid timestamp")
    }

    fn sample_promotion(id: i32, scope: PromotionScope, start: NaiveDateTime, end: NaiveDateTime) -> Promotion {
        Promotion {
            promotion_id: id,
            promotion_name: format!("Promo {id}"),
            promotion_description: "Spring sale".to_string(),
            promotion_type: PromotionType::Percentage,
            promotion_scope: scope,
            start_date: start,
            end_date: end,
            promotion_value: 15.0,
            promotion_code: None,
            created_by: Uuid::nil(),
            modified_by: None,
            created_when: date(2024, 1, 1),
            modified_when: None,
            active: false,
        }
    }

    #[test]
    fn enum_parse_ignores_case() {
        assert_eq!(
            PromotionScope::parse("entire_store").expect("should parse"),
            PromotionScope::EntireStore
        );
        assert_eq!(
            PromotionScope::parse("Product_Category").expect("should parse"),
            PromotionScope::ProductCategory
        );
        assert_eq!(
            PromotionType::parse("absolute").expect("should parse"),
            PromotionType::Absolute
        );
    }

    #[test]
    fn enum_parse_rejects_unknown_names() {
        match PromotionScope::parse("not_a_scope") {
            Err(ValidationError::InvalidEnum { field, value }) => {
                assert_eq!(field, "promotion_scope");
                assert_eq!(value, "not_a_scope");
            }
            other => panic!("expected enum error, got {other:?}"),
        }

        assert!(matches!(
            PromotionType::parse("BOGUS"),
            Err(ValidationError::InvalidEnum {
                field: "promotion_type",
                ..
            })
        ));
    }

    #[test]
    fn promotion_serializes_member_names_and_canonical_dates() {
        let promotion = sample_promotion(
            4,
            PromotionScope::ProductCategory,
            date(2025, 1, 1),
            date(2026, 1, 1),
        );

        let value = serde_json::to_value(&promotion).expect("serialization should succeed");

        assert_eq!(value["promotion_scope"], json!("PRODUCT_CATEGORY"));
        assert_eq!(value["promotion_type"], json!("PERCENTAGE"));
        assert_eq!(value["start_date"], json!("2025-01-01 00:00:00"));
        assert_eq!(value["modified_when"], json!(null));
        assert_eq!(value["modified_by"], json!(null));
        assert_eq!(value["created_by"], json!(Uuid::nil().to_string()));
    }

    #[test]
    fn serialized_dates_parse_back_to_the_same_instant() {
        let mut promotion = sample_promotion(
            5,
            PromotionScope::EntireStore,
            date(2025, 3, 3),
            date(2025, 3, 31),
        );
        promotion.modified_when = Some(date(2025, 3, 4));

        let value = serde_json::to_value(&promotion).expect("serialization should succeed");

        for (field, expected) in [
            ("start_date", promotion.start_date),
            ("end_date", promotion.end_date),
            ("created_when", promotion.created_when),
            ("modified_when", date(2025, 3, 4)),
        ] {
            let raw = value[field].as_str().expect("dates serialize as strings");
            let reparsed = datetime::parse_datetime("datetime", raw).expect("should reparse");
            assert_eq!(reparsed, expected);
            assert_eq!(datetime::format_datetime(&reparsed), raw);
        }
    }

    #[test]
    fn validity_window_includes_bounds() {
        let promotion = sample_promotion(1, PromotionScope::EntireStore, date(2025, 1, 1), date(2025, 2, 1));

        assert!(promotion.is_valid_at(date(2025, 1, 1)));
        assert!(promotion.is_valid_at(date(2025, 2, 1)));
        assert!(!promotion.is_valid_at(date(2025, 2, 2)));
    }

    #[test]
    fn empty_filter_keeps_everything_in_order() {
        let records = vec![
            sample_promotion(3, PromotionScope::ProductId, date(2020, 1, 1), date(2020, 2, 1)),
            sample_promotion(1, PromotionScope::EntireStore, date(2025, 1, 1), date(2026, 1, 1)),
        ];

        let filter = PromotionFilter::all();

        assert!(filter.is_unconstrained());
        assert_eq!(filter.apply(records.clone()), records);
    }

    #[test]
    fn builder_criteria_are_combined_with_and() {
        let r1 = sample_promotion(1, PromotionScope::EntireStore, date(2025, 1, 1), date(2026, 1, 1));
        let r2 = sample_promotion(2, PromotionScope::EntireStore, date(2024, 1, 1), date(2025, 3, 1));
        let mut r3 = sample_promotion(3, PromotionScope::EntireStore, date(2025, 1, 1), date(2026, 1, 1));
        r3.active = true;

        let filter = PromotionFilter::all()
            .valid_at(date(2025, 6, 1))
            .scopes([PromotionScope::EntireStore])
            .active(false);

        assert_eq!(filter.criteria().len(), 3);
        assert_eq!(filter.apply(vec![r1.clone(), r2, r3]), vec![r1]);
    }
}
