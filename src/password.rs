//! Temporary password generation.

use rand::seq::{IndexedRandom, SliceRandom};
use rand::Rng;

pub const PASSWORD_LEN: usize = 16;

const LOWER: &[u8] = b"abcdefghijkmnopqrstuvwxyz";
const UPPER: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ";
const DIGITS: &[u8] = b"23456789";
const SYMBOLS: &[u8] = b"!@#$%&*+-=?";

/// Random password with at least one character of each class.
///
/// Look-alike characters (`l`, `I`, `O`, `0`, `1`) are left out since the
/// password is read off a Discord message.
pub fn generate_password() -> String {
    generate_with(&mut rand::rng(), PASSWORD_LEN)
}

fn generate_with<R: Rng + ?Sized>(rng: &mut R, len: usize) -> String {
    let classes = [LOWER, UPPER, DIGITS, SYMBOLS];
    let all: Vec<u8> = classes.concat();

    let mut bytes: Vec<u8> = classes
        .iter()
        .filter_map(|class| class.choose(rng).copied())
        .collect();
    while bytes.len() < len.max(classes.len()) {
        bytes.push(all[rng.random_range(0..all.len())]);
    }
    bytes.shuffle(rng);

    bytes.into_iter().map(char::from).collect()
}
