use arena_engine::log::format_stat_sheet;
use arena_engine::stats::derive;
use arena_engine::{ItemDefinition, Side, StatGrowth, WarriorDefinition, WarriorType};
use proptest::prelude::*;

fn warrior(kind: WarriorType, tough: f64, dex: f64, smart: f64) -> WarriorDefinition {
    WarriorDefinition {
        name: "Grok".into(),
        title: String::new(),
        kind,
        toughness: tough,
        dexterity: dex,
        intelligence: smart,
        growth: StatGrowth::default(),
        min_base_damage: 10.0,
        max_base_damage: 15.0,
        base_attack_time: 2.0,
    }
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn bare_warrior_stats() {
    let s = derive(&warrior(WarriorType::Tough, 5.0, 0.0, 0.0), None);
    assert!(close(s.max_hp, 250.0));
    assert!(close(s.hp, s.max_hp));
    assert!(close(s.hp_regen, 0.5));
    assert!(close(s.defense, 0.0));
    assert!(close(s.min_dmg, 10.0));
    assert!(close(s.max_dmg, 15.0));
    assert!(close(s.cooldown, 2.0));
    // first attack only after one full cooldown
    assert!(close(s.next_attack_time, 2.0));
    assert_eq!(s.stun_end_time, 0.0);
    assert_eq!(s.stun_immune_until, 0.0);
    assert_eq!(s.stun_diminish, 1.0);
}

#[test]
fn item_bonuses_stack_on_attributes_and_flat_stats() {
    let item = ItemDefinition {
        name: "Kit".into(),
        add_toughness: 2.0,
        add_dexterity: 10.0,
        add_intelligence: 1.0,
        add_hp: 40.0,
        add_hp_regen: 1.0,
        add_damage: 5.0,
        add_defense: 3.0,
        add_attack_speed: 10.0,
    };
    let s = derive(&warrior(WarriorType::Smart, 5.0, 0.0, 0.0), Some(&item));
    // toughness 7
    assert!(close(s.max_hp, 150.0 + 140.0 + 40.0));
    assert!(close(s.hp_regen, 0.25 + 0.35 + 1.0));
    // dexterity 10
    assert!(close(s.defense, 23.0));
    // attack speed stat 20
    assert!(close(s.cooldown, 2.0 / 1.2));
    // intelligence 1
    assert!(close(s.min_dmg, 18.0));
    assert!(close(s.max_dmg, 23.0));
}

#[test]
fn stat_sheet_line() {
    let s = derive(&warrior(WarriorType::Tough, 5.0, 2.0, 1.0), None);
    insta::assert_snapshot!(
        format_stat_sheet(&s.sheet(Side::Team1)),
        @"Grok (Tough): HP 250.0 | regen 0.50/s | defense 4.0 | damage 13.0-18.0 | 0.51 attacks/s"
    );
}

#[test]
fn regen_stops_at_max_hp() {
    let mut s = derive(&warrior(WarriorType::Tough, 5.0, 0.0, 0.0), None);
    assert_eq!(s.regenerate(), None);
    s.hp = s.max_hp - 0.2;
    let healed = s.regenerate().unwrap();
    assert!(close(healed, 0.2));
    assert!(close(s.hp, s.max_hp));
    s.hp = -3.0;
    assert_eq!(s.regenerate(), None, "the defeated do not regenerate");
}

proptest! {
    #[test]
    fn derivation_is_pure(
        tough in 0.0f64..50.0,
        dex in 0.0f64..50.0,
        smart in 0.0f64..50.0,
        add_hp in -50.0f64..200.0,
        add_speed in 0.0f64..100.0,
    ) {
        let w = warrior(WarriorType::Dexterous, tough, dex, smart);
        let item = ItemDefinition {
            name: "x".into(),
            add_hp,
            add_attack_speed: add_speed,
            ..Default::default()
        };
        let a = derive(&w, Some(&item));
        let b = derive(&w, Some(&item));
        prop_assert_eq!(&a, &b);
        prop_assert_eq!(a.hp, a.max_hp);
        prop_assert!(a.max_dmg >= a.min_dmg);
    }

    #[test]
    fn regen_never_exceeds_max(
        tough in 0.0f64..100.0,
        regen_bonus in 0.0f64..500.0,
        start in 0.001f64..1.0,
        steps in 1usize..50,
    ) {
        let item = ItemDefinition { name: "x".into(), add_hp_regen: regen_bonus, ..Default::default() };
        let mut s = derive(&warrior(WarriorType::Tough, tough, 0.0, 0.0), Some(&item));
        s.hp = s.max_hp * start;
        for _ in 0..steps {
            s.regenerate();
            prop_assert!(s.hp <= s.max_hp);
        }
    }
}
