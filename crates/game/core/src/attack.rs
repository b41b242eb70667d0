//! Attack descriptors and attack sets.

use bitflags::bitflags;
use glam::Vec3;

use crate::combat::DamageInfo;
use crate::error::DescriptorError;
use crate::identity::CombatantId;
use crate::stats::CombatStats;
use crate::timing::NormalizedWindow;

bitflags! {
    /// Defensive and chaining properties of an attack.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "serde", serde(transparent))]
    pub struct AttackFlags: u8 {
        /// A defender's parry window applies to this attack.
        const PARRYABLE   = 1 << 0;
        /// The attacker cannot be staggered while this attack plays.
        const SUPER_ARMOR = 1 << 1;
        /// The attack may chain into its successor within the combo window.
        const CHAINABLE   = 1 << 2;
    }
}

/// Volume of a hitbox, relative to the attacker's facing.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HitboxShape {
    Sphere { radius: f32 },
    Box { half_extents: Vec3 },
    /// Horizontal sweep of `angle` degrees.
    Arc { radius: f32, angle: f32 },
}

/// Hitbox placement for one attack.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Hitbox {
    pub shape: HitboxShape,
    /// Sweep origin relative to the attacker: `x` right, `y` up, `z` along facing.
    pub offset: Vec3,
    /// Reach used by AI to decide whether the attack can connect.
    pub range: f32,
}

impl Default for Hitbox {
    fn default() -> Self {
        Self {
            shape: HitboxShape::Sphere { radius: 1.0 },
            offset: Vec3::ZERO,
            range: 2.0,
        }
    }
}

/// Combo metadata of an attack.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ComboInfo {
    /// Normalized interval in which a follow-up input chains.
    pub window: NormalizedWindow,
    /// Position of this attack in its chain.
    pub chain_index: u8,
}

impl Default for ComboInfo {
    fn default() -> Self {
        Self {
            window: NormalizedWindow::NEVER,
            chain_index: 0,
        }
    }
}

/// Immutable description of one attack.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AttackDescriptor {
    pub name: String,
    /// Animation trigger fired on entry.
    pub animation: String,
    pub base_damage: f32,
    pub damage_multiplier: f32,
    pub poise_damage: f32,
    /// Stamina paid up front.
    pub cost: f32,
    /// Total state duration in seconds.
    pub duration: f32,
    /// Normalized interval during which the hitbox is live.
    pub activation: NormalizedWindow,
    pub hitbox: Hitbox,
    pub combo: ComboInfo,
    pub flags: AttackFlags,
    /// Forward displacement spread over the first part of the attack.
    pub lunge_distance: f32,
    /// Normalized time until which the attacker keeps re-orienting.
    pub track_until: f32,
}

impl Default for AttackDescriptor {
    fn default() -> Self {
        Self {
            name: String::from("attack"),
            animation: String::from("attack"),
            base_damage: 10.0,
            damage_multiplier: 1.0,
            poise_damage: 10.0,
            cost: 15.0,
            duration: 1.0,
            activation: NormalizedWindow::new(0.3, 0.5),
            hitbox: Hitbox::default(),
            combo: ComboInfo::default(),
            flags: AttackFlags::PARRYABLE,
            lunge_distance: 0.0,
            track_until: 0.2,
        }
    }
}

impl AttackDescriptor {
    /// Creates a descriptor with the given name and default numbers.
    pub fn named(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            animation: name.clone(),
            name,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_damage(mut self, base_damage: f32, poise_damage: f32) -> Self {
        self.base_damage = base_damage;
        self.poise_damage = poise_damage;
        self
    }

    #[must_use]
    pub fn with_timing(mut self, duration: f32, activation: NormalizedWindow) -> Self {
        self.duration = duration;
        self.activation = activation;
        self
    }

    #[must_use]
    pub fn with_cost(mut self, cost: f32) -> Self {
        self.cost = cost;
        self
    }

    #[must_use]
    pub fn with_flags(mut self, flags: AttackFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Marks the attack chainable within `window`.
    #[must_use]
    pub fn with_combo(mut self, window: NormalizedWindow, chain_index: u8) -> Self {
        self.combo = ComboInfo {
            window,
            chain_index,
        };
        self.flags |= AttackFlags::CHAINABLE;
        self
    }

    #[must_use]
    pub fn with_lunge(mut self, distance: f32) -> Self {
        self.lunge_distance = distance;
        self
    }

    #[inline]
    pub fn is_parryable(&self) -> bool {
        self.flags.contains(AttackFlags::PARRYABLE)
    }

    #[inline]
    pub fn has_super_armor(&self) -> bool {
        self.flags.contains(AttackFlags::SUPER_ARMOR)
    }

    #[inline]
    pub fn is_chainable(&self) -> bool {
        self.flags.contains(AttackFlags::CHAINABLE)
    }

    /// Raw damage of this attack before attacker multipliers.
    pub fn raw_damage(&self) -> f32 {
        self.base_damage * self.damage_multiplier
    }

    /// Builds the outgoing hit for `attacker` with stats `stats`.
    pub fn damage_info(&self, attacker: CombatantId, stats: &CombatStats) -> DamageInfo {
        DamageInfo {
            amount: self.raw_damage() * stats.damage_multiplier,
            poise_damage: self.poise_damage * stats.poise_damage_multiplier,
            source: attacker,
            parryable: self.is_parryable(),
        }
    }

    /// Checks windows and numbers.
    ///
    /// # Errors
    ///
    /// Returns the first malformed field.
    pub fn validate(&self) -> Result<(), DescriptorError> {
        self.check_window("activation", self.activation)?;
        if self.is_chainable() {
            self.check_window("combo", self.combo.window)?;
        }
        self.check_positive("duration", self.duration)?;
        self.check_non_negative("base_damage", self.base_damage)?;
        self.check_non_negative("damage_multiplier", self.damage_multiplier)?;
        self.check_non_negative("poise_damage", self.poise_damage)?;
        self.check_non_negative("cost", self.cost)?;
        self.check_non_negative("lunge_distance", self.lunge_distance)?;
        self.check_non_negative("hitbox.range", self.hitbox.range)?;
        if !(0.0..=1.0).contains(&self.track_until) {
            return Err(DescriptorError::WindowOutOfRange {
                name: self.name.clone(),
                window: "track",
                start: 0.0,
                end: self.track_until,
            });
        }
        Ok(())
    }

    fn check_window(&self, window: &'static str, w: NormalizedWindow) -> Result<(), DescriptorError> {
        if w.start > w.end {
            return Err(DescriptorError::WindowReversed {
                name: self.name.clone(),
                window,
                start: w.start,
                end: w.end,
            });
        }
        if !w.is_well_formed() {
            return Err(DescriptorError::WindowOutOfRange {
                name: self.name.clone(),
                window,
                start: w.start,
                end: w.end,
            });
        }
        Ok(())
    }

    fn check_positive(&self, field: &'static str, value: f32) -> Result<(), DescriptorError> {
        if value > 0.0 {
            Ok(())
        } else {
            Err(DescriptorError::NotPositive {
                name: self.name.clone(),
                field,
                value,
            })
        }
    }

    fn check_non_negative(&self, field: &'static str, value: f32) -> Result<(), DescriptorError> {
        if value >= 0.0 {
            Ok(())
        } else {
            Err(DescriptorError::Negative {
                name: self.name.clone(),
                field,
                value,
            })
        }
    }
}

/// Ordered list of attacks available to one combatant.
///
/// The order doubles as the combo chain: a chainable attack at index `i`
/// continues into index `i + 1`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct AttackSet {
    attacks: Vec<AttackDescriptor>,
}

impl AttackSet {
    /// Builds a validated, non-empty set.
    ///
    /// # Errors
    ///
    /// Fails on an empty list or on the first invalid descriptor.
    pub fn new(attacks: Vec<AttackDescriptor>) -> Result<Self, DescriptorError> {
        let set = Self { attacks };
        set.validate()?;
        Ok(set)
    }

    /// Validates every descriptor (sets decoded from data bypass [`new`](Self::new)).
    ///
    /// # Errors
    ///
    /// See [`AttackDescriptor::validate`].
    pub fn validate(&self) -> Result<(), DescriptorError> {
        if self.attacks.is_empty() {
            return Err(DescriptorError::EmptySet);
        }
        self.attacks.iter().try_for_each(AttackDescriptor::validate)
    }

    pub fn len(&self) -> usize {
        self.attacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attacks.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&AttackDescriptor> {
        self.attacks.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &AttackDescriptor> {
        self.attacks.iter()
    }

    /// Index of the attack named `name`.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.attacks.iter().position(|attack| attack.name == name)
    }

    /// Index of the attack that follows `index` in the chain, if `index` is chainable.
    pub fn successor(&self, index: usize) -> Option<usize> {
        let current = self.attacks.get(index)?;
        let next = index + 1;
        (current.is_chainable() && next < self.attacks.len()).then_some(next)
    }

    /// First attack whose cost fits in `stamina` and whose reach covers `distance`.
    pub fn first_usable(&self, stamina: f32, distance: f32) -> Option<usize> {
        self.attacks
            .iter()
            .position(|attack| attack.cost <= stamina && attack.hitbox.range >= distance)
    }

    /// Usable attack with the highest raw damage; ties go to the earlier entry.
    pub fn heaviest_usable(&self, stamina: f32, distance: f32) -> Option<usize> {
        self.attacks
            .iter()
            .enumerate()
            .filter(|(_, attack)| attack.cost <= stamina && attack.hitbox.range >= distance)
            .fold(None, |best: Option<(usize, f32)>, (index, attack)| {
                let damage = attack.raw_damage();
                match best {
                    Some((_, top)) if top >= damage => best,
                    _ => Some((index, damage)),
                }
            })
            .map(|(index, _)| index)
    }

    /// Longest reach in the set.
    pub fn max_range(&self) -> f32 {
        self.attacks
            .iter()
            .map(|attack| attack.hitbox.range)
            .fold(0.0, f32::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain() -> AttackSet {
        AttackSet::new(vec![
            AttackDescriptor::named("slash")
                .with_cost(10.0)
                .with_combo(NormalizedWindow::new(0.5, 0.9), 0),
            AttackDescriptor::named("thrust")
                .with_cost(15.0)
                .with_damage(14.0, 12.0)
                .with_combo(NormalizedWindow::new(0.5, 0.9), 1),
            AttackDescriptor::named("overhead")
                .with_cost(30.0)
                .with_damage(25.0, 30.0),
        ])
        .unwrap()
    }

    #[test]
    fn empty_set_is_rejected() {
        assert_eq!(AttackSet::new(Vec::new()), Err(DescriptorError::EmptySet));
    }

    #[test]
    fn activation_window_must_lie_in_unit_interval() {
        let attack = AttackDescriptor::named("bad").with_timing(1.0, NormalizedWindow::new(0.4, 1.2));
        assert!(matches!(
            attack.validate(),
            Err(DescriptorError::WindowOutOfRange {
                window: "activation",
                ..
            })
        ));

        let attack = AttackDescriptor::named("bad").with_timing(1.0, NormalizedWindow::new(0.6, 0.4));
        assert!(matches!(
            attack.validate(),
            Err(DescriptorError::WindowReversed { .. })
        ));

        let attack = AttackDescriptor::named("bad").with_timing(0.0, NormalizedWindow::new(0.2, 0.4));
        assert!(matches!(
            attack.validate(),
            Err(DescriptorError::NotPositive {
                field: "duration",
                ..
            })
        ));
    }

    #[test]
    fn successor_follows_chainable_attacks_only() {
        let set = chain();
        assert_eq!(set.successor(0), Some(1));
        assert_eq!(set.successor(1), Some(2));
        assert_eq!(set.successor(2), None);
        assert_eq!(set.successor(7), None);
    }

    #[test]
    fn selection_respects_cost_and_reach() {
        let set = chain();
        assert_eq!(set.first_usable(100.0, 1.0), Some(0));
        assert_eq!(set.first_usable(5.0, 1.0), None);
        assert_eq!(set.first_usable(100.0, 10.0), None);
        assert_eq!(set.heaviest_usable(100.0, 1.0), Some(2));
        assert_eq!(set.heaviest_usable(20.0, 1.0), Some(1));
    }

    #[test]
    fn outgoing_damage_applies_attacker_multipliers() {
        let attack = AttackDescriptor::named("slash").with_damage(10.0, 8.0);
        let stats = CombatStats {
            damage_multiplier: 1.5,
            poise_damage_multiplier: 2.0,
            ..CombatStats::default()
        };
        let hit = attack.damage_info(CombatantId(3), &stats);
        assert_eq!(hit.amount, 15.0);
        assert_eq!(hit.poise_damage, 16.0);
        assert_eq!(hit.source, CombatantId(3));
        assert!(hit.parryable);
    }
}
