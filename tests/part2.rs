use assert_cmd::Command;
use predicates::prelude::predicate::str;

#[test]
fn part2_output_right_answer() {
    let mut cmd = Command::cargo_bin("part2").unwrap();
    cmd.arg("inputs.txt");

    cmd.assert()
        .success()
        .stdout(str::contains("removing one unit type has 4 unit(s)"));
}

#[test]
fn part2_output_per_type_lengths() {
    let mut cmd = Command::cargo_bin("part2").unwrap();
    cmd.arg("inputs.txt");

    cmd.assert()
        .success()
        .stdout(str::contains("Removing all a units leaves 6 unit(s)"))
        .stdout(str::contains("Removing all b units leaves 8 unit(s)"))
        .stdout(str::contains("Removing all c units leaves 4 unit(s)"))
        .stdout(str::contains("Removing all d units leaves 6 unit(s)"));
}
