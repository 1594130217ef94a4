#![cfg(test)]

use crate::{test_prototypes, try_prototype, ItemID, SpeciesID};

const TEST_DATA: &str = r#"
{
  "items": [
    { "name": "wheat", "label": "Wheat", "icon": 4155 },
    { "name": "iron-ingot", "label": "Iron Ingot", "icon": 7154 }
  ],
  "species": [
    { "name": "horse", "label": "a horse" },
    { "name": "dire-wolf", "label": "a dire wolf", "wander_range": 14 }
  ]
}
"#;

#[test]
fn test_base() {
    test_prototypes(TEST_DATA);

    let wheat = try_prototype(ItemID::new("wheat")).unwrap();
    assert_eq!(wheat.label, "Wheat");
    assert_eq!(wheat.icon, 4155);

    let wolf = try_prototype(SpeciesID::new("dire-wolf")).unwrap();
    assert_eq!(wolf.label, "a dire wolf");
    assert_eq!(wolf.wander_range, 14);

    let horse = try_prototype(SpeciesID::new("horse")).unwrap();
    assert_eq!(horse.wander_range, 10);

    assert!(try_prototype(ItemID::new("unobtainium")).is_none());
}

#[test]
fn test_id_is_stable_hash_of_name() {
    test_prototypes(TEST_DATA);

    assert_eq!(ItemID::new("wheat"), ItemID::from(&"wheat".to_string()));
    assert_eq!(ItemID::new("wheat").hash(), common::hash_u64("wheat"));
    assert_ne!(ItemID::new("wheat"), ItemID::new("iron-ingot"));
}
