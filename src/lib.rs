use std::{
    error,
    fmt::Display,
    fs::File,
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::Parser;
use rayon::iter::{IntoParallelIterator, ParallelIterator};

#[derive(Debug)]
pub enum Error {
    EmptyFile,
    InvalidUnitChar(char),
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::EmptyFile => write!(
                f,
                "Can't read polymer from empty file, expect one line in it."
            ),
            Error::InvalidUnitChar(c) => write!(
                f,
                "Invalid character({}) for unit, only ASCII letters are expected.",
                c
            ),
        }
    }
}

impl error::Error for Error {}

#[derive(Debug, Parser)]
pub struct CLIArgs {
    pub input_path: PathBuf,
}

const BASE_TYPE_N: usize = 26;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    Upper,
    Lower,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Unit {
    base_type: u8,
    polarity: Polarity,
}

impl TryFrom<char> for Unit {
    type Error = Error;

    fn try_from(value: char) -> std::result::Result<Self, Self::Error> {
        if value.is_ascii_uppercase() {
            Ok(Self {
                base_type: value as u8 - b'A',
                polarity: Polarity::Upper,
            })
        } else if value.is_ascii_lowercase() {
            Ok(Self {
                base_type: value as u8 - b'a',
                polarity: Polarity::Lower,
            })
        } else {
            Err(Error::InvalidUnitChar(value))
        }
    }
}

impl Display for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let c = match self.polarity {
            Polarity::Upper => (self.base_type + b'A') as char,
            Polarity::Lower => (self.base_type + b'a') as char,
        };
        write!(f, "{}", c)
    }
}

impl Unit {
    // Two units react only when they share a base type but differ in polarity.
    pub fn reacts_with(&self, other: &Unit) -> bool {
        self.base_type == other.base_type && self.polarity != other.polarity
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Polymer {
    units: Vec<Unit>,
}

impl TryFrom<&str> for Polymer {
    type Error = Error;

    fn try_from(value: &str) -> std::result::Result<Self, Self::Error> {
        let units = value
            .chars()
            .map(Unit::try_from)
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(Self { units })
    }
}

impl Display for Polymer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for unit in &self.units {
            write!(f, "{}", unit)?;
        }

        Ok(())
    }
}

impl Polymer {
    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    // Annihilation of adjacent reacting pairs is confluent, so one
    // left-to-right pass with the output vector used as a stack finds the
    // same irreducible polymer any removal order would.
    pub fn reduce(&self) -> Polymer {
        let mut reduced = Vec::with_capacity(self.units.len());
        for unit in &self.units {
            match reduced.last().copied() {
                Some(top) if unit.reacts_with(&top) => {
                    reduced.pop();
                }
                _ => reduced.push(*unit),
            }
        }

        Polymer { units: reduced }
    }

    pub fn without_type(&self, base_type: u8) -> Polymer {
        let units = self
            .units
            .iter()
            .filter(|u| u.base_type != base_type)
            .copied()
            .collect();

        Polymer { units }
    }

    pub fn base_types(&self) -> Vec<u8> {
        let mut present = [false; BASE_TYPE_N];
        for unit in &self.units {
            present[unit.base_type as usize] = true;
        }

        (0..BASE_TYPE_N as u8)
            .filter(|t| present[*t as usize])
            .collect()
    }

    // Every candidate reduction only reads this polymer, so they all run on
    // rayon's pool at once; collect keeps them in candidate order.
    pub fn exclusion_lens(&self) -> Vec<(char, usize)> {
        self.base_types()
            .into_par_iter()
            .map(|t| ((t + b'a') as char, self.without_type(t).reduce().len()))
            .collect()
    }

    pub fn min_len_by_exclusion(&self) -> usize {
        self.exclusion_lens()
            .into_iter()
            .map(|(_, len)| len)
            .min()
            .unwrap_or_else(|| self.reduce().len())
    }
}

pub fn read_polymer<P: AsRef<Path>>(path: P) -> Result<Polymer> {
    let file = File::open(&path)
        .with_context(|| format!("Failed to open given file({}).", path.as_ref().display()))?;
    let reader = BufReader::new(file);
    reader
        .lines()
        .next()
        .ok_or(Error::EmptyFile)?
        .with_context(|| {
            format!(
                "Failed to read the first line of given file({}).",
                path.as_ref().display()
            )
        })
        .and_then(|s| {
            Polymer::try_from(s.trim())
                .with_context(|| format!("Failed to parse polymer from given text({}).", s))
        })
}

#[cfg(test)]
fn polymer(s: &str) -> Polymer {
    Polymer::try_from(s).unwrap()
}

// Quadratic scan-to-fixpoint reduction, removing the leftmost reacting pair
// per pass. Used only as an oracle to check the stack reduction against.
#[cfg(test)]
fn reduce_by_rescan(p: &Polymer) -> Polymer {
    let mut units = p.units.clone();
    loop {
        let reacting_ind = units
            .windows(2)
            .position(|pair| pair[0].reacts_with(&pair[1]));
        match reacting_ind {
            Some(ind) => {
                units.drain(ind..(ind + 2));
            }
            None => break,
        }
    }

    Polymer { units }
}

// A fixed-seed generated polymer, long enough that reduction chains through
// many newly-adjacent pairs.
#[cfg(test)]
fn generated_polymer() -> Polymer {
    let mut state = 42u64;
    let units = (0..500)
        .map(|_| {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            let base_type = ((state >> 33) % 4) as u8;
            let polarity = if (state >> 16) & 1 == 0 {
                Polarity::Upper
            } else {
                Polarity::Lower
            };
            Unit { base_type, polarity }
        })
        .collect();

    Polymer { units }
}

#[test]
fn test_reduce_annihilates_whole_polymer() {
    assert_eq!(polymer("aA").reduce().len(), 0);
    assert_eq!(polymer("abBA").reduce().len(), 0);
}

#[test]
fn test_reduce_keeps_irreducible_polymer() {
    assert_eq!(polymer("abAB").reduce(), polymer("abAB"));
    assert_eq!(polymer("aabAAB").reduce(), polymer("aabAAB"));
}

#[test]
fn test_reduce_sample_polymer() {
    let reduced = polymer("dabAcCaCBAcCcaDA").reduce();
    assert_eq!(reduced, polymer("dabCBAcaDA"));
    assert_eq!(reduced.len(), 10);
}

#[test]
fn test_reduce_empty_polymer() {
    assert!(polymer("").reduce().is_empty());
}

#[test]
fn test_reduce_is_idempotent() {
    for s in ["", "aA", "abAB", "aabAAB", "dabAcCaCBAcCcaDA"] {
        let once = polymer(s).reduce();
        assert_eq!(once.reduce(), once);
    }

    let once = generated_polymer().reduce();
    assert_eq!(once.reduce(), once);
}

#[test]
fn test_reduce_never_lengthens() {
    for s in ["", "aA", "abAB", "aabAAB", "dabAcCaCBAcCcaDA"] {
        let p = polymer(s);
        let reduced = p.reduce();
        assert!(reduced.len() <= p.len());
        assert_eq!(reduced.len() == p.len(), reduced == p);
    }
}

#[test]
fn test_reduce_matches_rescan_oracle() {
    for s in ["", "aA", "abBA", "abAB", "aabAAB", "dabAcCaCBAcCcaDA", "AbaBcCaA"] {
        let p = polymer(s);
        assert_eq!(p.reduce(), reduce_by_rescan(&p));
    }

    let p = generated_polymer();
    assert_eq!(p.reduce(), reduce_by_rescan(&p));
}

#[test]
fn test_base_types_are_distinct_and_sorted() {
    assert_eq!(polymer("dabAcCaCBAcCcaDA").base_types(), vec![0, 1, 2, 3]);
    assert!(polymer("").base_types().is_empty());
}

#[test]
fn test_exclusion_lens_sample_polymer() {
    assert_eq!(
        polymer("dabAcCaCBAcCcaDA").exclusion_lens(),
        vec![('a', 6), ('b', 8), ('c', 4), ('d', 6)]
    );
}

#[test]
fn test_min_len_by_exclusion_sample_polymer() {
    assert_eq!(polymer("dabAcCaCBAcCcaDA").min_len_by_exclusion(), 4);
}

#[test]
fn test_min_len_by_exclusion_empty_polymer() {
    assert_eq!(polymer("").min_len_by_exclusion(), 0);
}

#[test]
fn test_min_len_by_exclusion_never_beats_plain_reduce() {
    for s in ["aA", "abAB", "aabAAB", "dabAcCaCBAcCcaDA"] {
        let p = polymer(s);
        assert!(p.min_len_by_exclusion() <= p.reduce().len());
    }

    let p = generated_polymer();
    assert!(p.min_len_by_exclusion() <= p.reduce().len());
}

#[test]
fn test_unit_rejects_non_letter() {
    assert!(matches!(
        Unit::try_from('3'),
        Err(Error::InvalidUnitChar('3'))
    ));
    assert!(matches!(Unit::try_from(' '), Err(Error::InvalidUnitChar(' '))));
    assert!(matches!(
        Polymer::try_from("ab!BA"),
        Err(Error::InvalidUnitChar('!'))
    ));
}

#[test]
fn test_read_polymer_empty_file() {
    let path = std::env::temp_dir().join("day5_empty_inputs.txt");
    std::fs::write(&path, "").unwrap();

    let err = read_polymer(&path).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<Error>(),
        Some(Error::EmptyFile)
    ));

    std::fs::remove_file(&path).ok();
}

#[test]
fn test_polymer_display_round_trip() {
    let s = "dabAcCaCBAcCcaDA";
    assert_eq!(polymer(s).to_string(), s);
}
