use assert_cmd::Command;
use predicates::prelude::*;

fn arena() -> Command {
    Command::cargo_bin("arena").unwrap()
}

#[test]
fn lists_builtin_warriors() {
    arena()
        .arg("warriors")
        .assert()
        .success()
        .stdout(predicate::str::contains("Grok the Unmoving (Tough)"))
        .stdout(predicate::str::contains("(Smart)"));
}

#[test]
fn shows_derived_stats_with_item() {
    // Grok: tough 6+2, dex 1 → HP 150 + 160 + 40
    arena()
        .args(["stats", "Grok", "--item", "Iron Plate"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Grok (Tough): HP 350.0"));
}

#[test]
fn seeded_duel_prints_report() {
    arena()
        .args(["battle", "--team1", "Grok", "--team2", "Lira:Swift Boots", "--seed", "4"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("=== Battle Report ==="))
        .stdout(predicate::str::contains("[END]"));
}

#[test]
fn json_report_has_outcome() {
    let out = arena()
        .args(["battle", "--team1", "Oren", "--team2", "Brakka", "--seed", "8", "--json"])
        .output()
        .unwrap();
    assert!(out.status.success());
    let v: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert!(matches!(
        v["outcome"].as_str(),
        Some("team1_victory" | "team2_victory" | "draw")
    ));
    assert!(v["events"].as_array().is_some_and(|e| !e.is_empty()));
}

#[test]
fn uneven_teams_fail() {
    arena()
        .args(["battle", "--team1", "Grok", "--team2", "Vesh", "--team2", "Oren"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("team size mismatch"));
}

#[test]
fn unknown_warrior_fails() {
    arena()
        .args(["stats", "Nobody"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown warrior 'Nobody'"));
}

#[test]
fn sim_reports_rates() {
    Command::cargo_bin("arena-sim")
        .unwrap()
        .args(["--team1", "Grok", "--team2", "Vesh", "--trials", "20", "--seed", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("trials:             20"))
        .stdout(predicate::str::contains("team 1 win rate:"));
}

#[test]
fn sim_reads_utf16_roster_export() {
    let csv = "name,title,type,tough,inctough,dex,incdex,smart,incsmart,min_dmg,max_dmg,attack_time\n\
               Ursa,,Tough,4,0,1,0,0,0,10,14,2\n\
               Wisp,,Smart,1,0,2,0,4,0,8,12,1.6\n";
    let mut bytes = vec![0xFF, 0xFE];
    bytes.extend(csv.encode_utf16().flat_map(u16::to_le_bytes));
    let path = std::env::temp_dir().join(format!("arena-utf16-{}.csv", std::process::id()));
    std::fs::write(&path, bytes).unwrap();

    let assert = Command::cargo_bin("arena-sim")
        .unwrap()
        .arg("--warriors")
        .arg(&path)
        .args(["--team1", "Ursa", "--team2", "Wisp", "--trials", "5"])
        .assert();
    std::fs::remove_file(&path).ok();
    assert
        .success()
        .stdout(predicate::str::contains("trials:             5"));
}
