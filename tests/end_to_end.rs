//! End-to-end tests across both layers: registry resolution with multiple
//! extension sources, field-set assembly, condition building, and the
//! serialization round-trip of a finished condition.

use fieldsearch::{
    Compare, CompareOperator, CoreExtension, FieldRegistry, FieldSetBuilder, FieldType,
    FieldTypeExtension, OptionsMap, PatternMatch, PatternMatchType, PreloadedExtension, Range,
    Scalar, SearchCondition, SearchField, SearchFieldView, SearchPreCondition, SingleValue,
    ValueTypeKind, ValuesBag, ValuesError, ValuesGroup,
};
use std::sync::Arc;

struct TypeA;

impl FieldType for TypeA {
    fn block_prefix(&self) -> &str {
        "a"
    }

    fn default_options(&self, options: &mut OptionsMap) {
        options.insert("size".to_string(), Scalar::Int(10));
    }
}

struct TypeB;

impl FieldType for TypeB {
    fn block_prefix(&self) -> &str {
        "b"
    }

    fn parent_type(&self) -> Option<&str> {
        Some("a")
    }

    fn default_options(&self, options: &mut OptionsMap) {
        options.insert("size".to_string(), Scalar::Int(20));
        options.insert("label".to_string(), Scalar::from("x"));
    }
}

struct FlagExtension;

impl FieldTypeExtension for FlagExtension {
    fn extended_type(&self) -> &str {
        "b"
    }

    fn default_options(&self, options: &mut OptionsMap) {
        options.insert("flag".to_string(), Scalar::Bool(true));
        options.insert("label".to_string(), Scalar::from("y"));
    }

    fn build_view(&self, view: &mut SearchFieldView, _field: &SearchField) {
        view.vars.insert("extended".to_string(), Scalar::Bool(true));
    }
}

#[test]
fn two_sources_with_inheritance_and_extension() {
    let source1 = PreloadedExtension::new().with_type("a", Arc::new(TypeA));
    let source2 = PreloadedExtension::new()
        .with_type("b", Arc::new(TypeB))
        .with_type_extension("b", Arc::new(FlagExtension));

    let registry = FieldRegistry::new(vec![Arc::new(source1), Arc::new(source2)]);

    let b = registry.get_type("b").unwrap();
    let options = b.default_options();

    // parent default survives, type override wins, extension override wins
    assert_eq!(options.get("size"), Some(&Scalar::Int(20)));
    assert_eq!(options.get("label"), Some(&Scalar::from("y")));
    assert_eq!(options.get("flag"), Some(&Scalar::Bool(true)));

    // b's resolved parent is the same cached instance "a" resolves to
    let a = registry.get_type("a").unwrap();
    assert!(Arc::ptr_eq(b.parent().unwrap(), &a));

    // repeated resolution is identity-stable
    assert!(Arc::ptr_eq(&registry.get_type("b").unwrap(), &b));
}

#[test]
fn extension_adjusts_view_after_base_type() {
    let source = PreloadedExtension::new()
        .with_type("a", Arc::new(TypeA))
        .with_type("b", Arc::new(TypeB))
        .with_type_extension("b", Arc::new(FlagExtension));

    let registry = FieldRegistry::new(vec![Arc::new(source)]);
    let b = registry.get_type("b").unwrap();

    let mut field = b.create_field("ref", OptionsMap::new()).unwrap();
    field.set_data_locked().unwrap();

    let view = field.create_view().unwrap();
    assert_eq!(view.name, "ref");
    assert_eq!(view.vars.get("extended"), Some(&Scalar::Bool(true)));
}

#[test]
fn schema_and_condition_round_trip() {
    let registry = FieldRegistry::new(vec![Arc::new(CoreExtension::new())]);

    let mut builder = FieldSetBuilder::new(&registry);
    builder.set_name("products");
    builder.add_field("name", "text", OptionsMap::new()).unwrap();
    builder
        .add_field("price", "integer", OptionsMap::new())
        .unwrap();
    let fields = builder.build();

    let name_field = fields.field("name").unwrap();
    assert!(name_field.supports_value_type(ValueTypeKind::PatternMatch));
    let price_field = fields.field("price").unwrap();
    assert!(price_field.supports_value_type(ValueTypeKind::Range));

    // Assemble a condition the way an input processor would
    let mut name_bag = ValuesBag::new();
    name_bag
        .add_pattern_match(PatternMatch::new("sock", PatternMatchType::Contains).case_insensitive())
        .unwrap();

    let mut price_bag = ValuesBag::new();
    price_bag.add_range(Range::new(10, 50)).unwrap();
    price_bag
        .add_comparison(Compare::new(100, CompareOperator::Lt))
        .unwrap();
    price_bag.add_single_value(SingleValue::new(25)).unwrap();

    let mut root = ValuesGroup::new();
    root.add_field("name", name_bag).unwrap();
    root.add_field("price", price_bag).unwrap();

    let condition = SearchCondition::new(root).unwrap();
    assert_eq!(condition.values_group().count_values(), 4);
    assert!(condition.values_group().is_data_locked());

    // the finished condition survives serialization intact
    let json = serde_json::to_string(&condition).unwrap();
    let restored: SearchCondition = serde_json::from_str(&json).unwrap();
    assert_eq!(condition, restored);

    // and stays locked after restore
    let mut group = restored.values_group().clone();
    assert!(group
        .add_field("late", ValuesBag::new())
        .is_err());
}

#[test]
fn locked_condition_still_supports_error_clearing() {
    let mut bag = ValuesBag::new();
    bag.add_single_value(SingleValue::new("x")).unwrap();
    let error = ValuesError::new("single_values[0]", "not a number");
    bag.add_error(error.clone()).unwrap();

    let mut root = ValuesGroup::new();
    root.add_field("price", bag).unwrap();
    let condition = SearchCondition::new(root).unwrap();

    assert!(condition.values_group().has_errors(true));

    // a revalidation pass may clear errors on the locked tree
    let mut group = condition.values_group().clone();
    group.field_mut("price").unwrap().remove_error(&error);
    assert!(!group.has_errors(true));
}

#[test]
fn pre_condition_wraps_its_group() {
    let mut bag = ValuesBag::new();
    bag.add_single_value(SingleValue::new(7)).unwrap();
    let mut group = ValuesGroup::new();
    group.add_field("tenant", bag).unwrap();

    let pre = SearchPreCondition::new(group);
    assert_eq!(pre.values_group().count_values(), 1);
}
