//! Card effects and equipment bonuses
//!
//! Effect text is normalized (ASCII, lowercase) and scanned once when a card
//! or item is created. The resolver only ever sees the typed variants.
//! Clauses that match no known pattern are ignored.

use deunicode::deunicode;
use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::{char, digit1, space0, space1},
    combinator::{map, map_res, value},
    sequence::{preceded, terminated, tuple},
    IResult,
};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// On-play effects and keywords a card can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Effect {
    /// Deal N damage to the opposing hero
    DamageHero(u32),
    /// Draw N cards
    Draw(u32),
    /// Gain N Fury (only meaningful for a hero with Fury)
    GainFury(u32),
    /// Gain N armor
    GainArmor(u32),
    /// Gain N gold
    GainGold(u32),
    /// Restore N health to your hero
    Heal(u32),
    /// Minion can attack the turn it is played
    Prepared,
    /// Spell goes to the echo zone and returns to hand at your next upkeep
    Echo,
}

impl Effect {
    /// Keywords change how a card is played rather than doing something on play
    pub fn is_keyword(&self) -> bool {
        matches!(self, Effect::Prepared | Effect::Echo)
    }
}

pub type EffectList = SmallVec<[Effect; 2]>;

/// Stat bonus granted by a piece of equipment while it is worn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquipmentBonus {
    Health(u32),
    Armor(u32),
    Mana(u32),
    WeaponDamage(u32),
}

pub type BonusList = SmallVec<[EquipmentBonus; 2]>;

/// Parse card effect text into effects
pub fn parse_effects(text: &str) -> EffectList {
    scan(text, effect)
}

/// Parse equipment effect text into stat bonuses
pub fn parse_equipment_bonuses(text: &str) -> BonusList {
    scan(text, equipment_bonus)
}

/// Normalize effect text for matching
pub fn normalize(text: &str) -> String {
    deunicode(text).to_lowercase()
}

/// Try `parser` at every word start and collect each match
fn scan<T, F>(text: &str, parser: F) -> SmallVec<[T; 2]>
where
    F: Fn(&str) -> IResult<&str, T>,
{
    let normalized = normalize(text);
    let mut found = SmallVec::new();
    let mut rest = normalized.trim_start();

    while !rest.is_empty() {
        match parser(rest) {
            Ok((remaining, parsed)) if at_word_boundary(remaining) => {
                found.push(parsed);
                rest = remaining;
            }
            _ => rest = skip_word(rest),
        }
    }

    found
}

fn at_word_boundary(input: &str) -> bool {
    input.chars().next().map_or(true, |c| !c.is_alphanumeric())
}

fn skip_word(input: &str) -> &str {
    let after_word = input.trim_start_matches(char::is_alphanumeric);
    let next = after_word.trim_start_matches(|c: char| !c.is_alphanumeric() && c != '+');
    if next.len() == input.len() {
        let mut chars = input.chars();
        chars.next();
        chars.as_str()
    } else {
        next
    }
}

fn number(input: &str) -> IResult<&str, u32> {
    map_res(digit1, str::parse::<u32>)(input)
}

/// "3", "a" or "an"
fn amount(input: &str) -> IResult<&str, u32> {
    alt((number, value(1, alt((tag("an"), tag("a"))))))(input)
}

fn effect(input: &str) -> IResult<&str, Effect> {
    alt((deal_damage, draw, gain, restore, keyword))(input)
}

fn deal_damage(input: &str) -> IResult<&str, Effect> {
    map(
        tuple((tag("deal"), space1, amount, space1, tag("damage"))),
        |(_, _, n, _, _)| Effect::DamageHero(n),
    )(input)
}

fn draw(input: &str) -> IResult<&str, Effect> {
    map(preceded(tuple((tag("draw"), space1)), amount), Effect::Draw)(input)
}

fn gain(input: &str) -> IResult<&str, Effect> {
    let (input, n) = preceded(tuple((tag("gain"), space1)), amount)(input)?;
    let (input, _) = space1(input)?;
    alt((
        value(Effect::GainFury(n), tag("fury")),
        value(Effect::GainArmor(n), tag("armor")),
        value(Effect::GainGold(n), tag("gold")),
        value(Effect::Heal(n), tag("health")),
    ))(input)
}

fn restore(input: &str) -> IResult<&str, Effect> {
    alt((
        map(
            tuple((tag("restore"), space1, amount, space1, tag("health"))),
            |(_, _, n, _, _)| Effect::Heal(n),
        ),
        map(preceded(tuple((tag("heal"), space1)), number), Effect::Heal),
    ))(input)
}

fn keyword(input: &str) -> IResult<&str, Effect> {
    alt((
        value(Effect::Prepared, tag("prepared")),
        value(Effect::Echo, tag("echo")),
    ))(input)
}

/// "+2 health", "+1 max mana", "+3 weapon damage"
fn equipment_bonus(input: &str) -> IResult<&str, EquipmentBonus> {
    let (input, n) = preceded(terminated(char('+'), space0), number)(input)?;
    let (input, _) = space1(input)?;
    alt((
        value(
            EquipmentBonus::Health(n),
            alt((tag("max health"), tag("health"), tag("hp"))),
        ),
        value(EquipmentBonus::Armor(n), tag("armor")),
        value(EquipmentBonus::Mana(n), alt((tag("max mana"), tag("mana")))),
        value(
            EquipmentBonus::WeaponDamage(n),
            alt((tag("weapon damage"), tag("damage"), tag("attack"))),
        ),
    ))(input)
}
