//! Mutable per-combatant counters.

use super::CombatStats;

/// Current health, stamina and poise of one combatant.
///
/// Derived from [`CombatStats`] at spawn and owned by exactly one controller.
/// Not `Clone`: two entities never share or copy counters.
#[derive(Debug, PartialEq)]
pub struct RuntimeData {
    health: f32,
    stamina: f32,
    poise: f32,
    max_health: f32,
    max_stamina: f32,
    max_poise: f32,
    last_resource_use: Option<f32>,
    last_poise_hit: Option<f32>,
}

impl RuntimeData {
    /// Spawn values: health and stamina at max, poise empty.
    pub fn from_stats(stats: &CombatStats) -> Self {
        Self {
            health: stats.max_health,
            stamina: stats.max_stamina,
            poise: 0.0,
            max_health: stats.max_health,
            max_stamina: stats.max_stamina,
            max_poise: stats.max_poise,
            last_resource_use: None,
            last_poise_hit: None,
        }
    }

    #[inline]
    pub fn health(&self) -> f32 {
        self.health
    }

    #[inline]
    pub fn stamina(&self) -> f32 {
        self.stamina
    }

    #[inline]
    pub fn poise(&self) -> f32 {
        self.poise
    }

    #[inline]
    pub fn max_health(&self) -> f32 {
        self.max_health
    }

    #[inline]
    pub fn max_stamina(&self) -> f32 {
        self.max_stamina
    }

    #[inline]
    pub fn max_poise(&self) -> f32 {
        self.max_poise
    }

    pub fn last_resource_use(&self) -> Option<f32> {
        self.last_resource_use
    }

    pub fn last_poise_hit(&self) -> Option<f32> {
        self.last_poise_hit
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }

    /// Health as a fraction of max, for display.
    pub fn health_ratio(&self) -> f32 {
        self.health / self.max_health
    }

    /// Removes health, flooring at zero. Returns the amount actually removed.
    ///
    /// No-op once dead or for non-positive amounts.
    pub fn apply_damage(&mut self, amount: f32) -> f32 {
        if !self.is_alive() || amount <= 0.0 {
            return 0.0;
        }
        let before = self.health;
        self.health = (self.health - amount).max(0.0);
        before - self.health
    }

    /// Restores health, clamping at max. Returns the amount actually restored.
    ///
    /// No-op once dead: death is permanent.
    pub fn heal(&mut self, amount: f32) -> f32 {
        if !self.is_alive() || amount <= 0.0 {
            return 0.0;
        }
        let before = self.health;
        self.health = (self.health + amount).min(self.max_health);
        self.health - before
    }

    /// Accumulates poise damage at `now` and returns true if this hit leaves
    /// the pool full. Hits carrying no poise never break it.
    ///
    /// Accumulation is strictly additive. Several hits in the same tick each
    /// stamp `now`, so the last hit of the tick owns the regen delay.
    pub fn add_poise(&mut self, amount: f32, now: f32) -> bool {
        if amount <= 0.0 {
            return false;
        }
        self.poise = (self.poise + amount).min(self.max_poise);
        self.last_poise_hit = Some(now);
        self.poise >= self.max_poise
    }

    /// Empties the poise pool (heavy stagger).
    pub fn reset_poise(&mut self) {
        self.poise = 0.0;
    }

    /// Returns true if `cost` stamina is available.
    #[inline]
    pub fn can_afford(&self, cost: f32) -> bool {
        self.stamina >= cost
    }

    /// Spends `cost` stamina if affordable, restarting the regen delay.
    ///
    /// Returns false (and changes nothing) when the pool is too low.
    pub fn try_consume(&mut self, cost: f32, now: f32) -> bool {
        if !self.can_afford(cost) {
            return false;
        }
        if cost > 0.0 {
            self.stamina -= cost;
            self.last_resource_use = Some(now);
        }
        true
    }

    /// Advances regeneration by `dt` seconds ending at `now`.
    ///
    /// Stamina refills and poise decays at their per-second rates, each only
    /// once its own delay since the last use/hit has elapsed.
    pub fn regenerate(&mut self, stats: &CombatStats, now: f32, dt: f32) {
        if !self.is_alive() || dt <= 0.0 {
            return;
        }

        if self.stamina < self.max_stamina
            && delay_elapsed(self.last_resource_use, now, stats.stamina_regen_delay)
        {
            self.stamina = (self.stamina + stats.stamina_regen_rate * dt).min(self.max_stamina);
        }

        if self.poise > 0.0 && delay_elapsed(self.last_poise_hit, now, stats.poise_regen_delay) {
            self.poise = (self.poise - stats.poise_regen_rate * dt).max(0.0);
        }
    }
}

fn delay_elapsed(last: Option<f32>, now: f32, delay: f32) -> bool {
    match last {
        Some(at) => now - at >= delay,
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats() -> CombatStats {
        CombatStats::default()
            .with_pools(50.0, 40.0, 30.0)
            .with_poise_regen(10.0, 1.0)
            .with_stamina_regen(20.0, 0.5)
    }

    #[test]
    fn spawn_values() {
        let data = RuntimeData::from_stats(&stats());
        assert_eq!(data.health(), 50.0);
        assert_eq!(data.stamina(), 40.0);
        assert_eq!(data.poise(), 0.0);
        assert!(data.is_alive());
    }

    #[test]
    fn damage_floors_at_zero_and_death_is_permanent() {
        let mut data = RuntimeData::from_stats(&stats());
        assert_eq!(data.apply_damage(30.0), 30.0);
        assert_eq!(data.apply_damage(30.0), 20.0);
        assert_eq!(data.health(), 0.0);
        assert!(!data.is_alive());

        assert_eq!(data.heal(10.0), 0.0);
        assert_eq!(data.apply_damage(5.0), 0.0);
        assert_eq!(data.health(), 0.0);
    }

    #[test]
    fn heal_clamps_to_max() {
        let mut data = RuntimeData::from_stats(&stats());
        data.apply_damage(5.0);
        assert_eq!(data.heal(100.0), 5.0);
        assert_eq!(data.health(), 50.0);
    }

    #[test]
    fn poise_accumulates_and_saturates() {
        let mut data = RuntimeData::from_stats(&stats());
        assert!(!data.add_poise(10.0, 0.0));
        assert!(!data.add_poise(10.0, 0.2));
        assert!(data.add_poise(25.0, 0.4));
        assert_eq!(data.poise(), 30.0);
        assert_eq!(data.last_poise_hit(), Some(0.4));
        data.reset_poise();
        assert_eq!(data.poise(), 0.0);
    }

    #[test]
    fn full_pool_does_not_break_on_poiseless_hits() {
        let mut data = RuntimeData::from_stats(&stats());
        assert!(data.add_poise(40.0, 0.0));
        assert!(!data.add_poise(0.0, 0.1));
        assert!(!data.add_poise(-5.0, 0.2));
        assert_eq!(data.poise(), 30.0);
        assert_eq!(data.last_poise_hit(), Some(0.0));
    }

    #[test]
    fn poise_regen_waits_for_delay_after_last_hit() {
        let stats = stats();
        let mut data = RuntimeData::from_stats(&stats);
        data.add_poise(20.0, 0.0);

        data.regenerate(&stats, 0.5, 0.5);
        assert_eq!(data.poise(), 20.0);

        data.regenerate(&stats, 1.5, 0.5);
        assert_eq!(data.poise(), 15.0);
    }

    #[test]
    fn consumption_gates_on_affordability_and_delays_regen() {
        let stats = stats();
        let mut data = RuntimeData::from_stats(&stats);
        assert!(data.try_consume(30.0, 1.0));
        assert!(!data.try_consume(30.0, 1.0));
        assert_eq!(data.stamina(), 10.0);

        data.regenerate(&stats, 1.25, 0.25);
        assert_eq!(data.stamina(), 10.0);

        data.regenerate(&stats, 1.75, 0.5);
        assert_eq!(data.stamina(), 20.0);
    }
}
