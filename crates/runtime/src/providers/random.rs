//! Randomized AI that only ever proposes plans the runtime will accept.

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use arena_core::economy::{self, spend};
use arena_core::{
    CombatantId, CombatantState, EnergyColor, EnergyPool, MatchAction, MatchState, Skill,
    TeamSide, WaveCategory,
};

use crate::api::{ActionProvider, Result, Submission};

/// Picks a random affordable skill and a random legal target for each living
/// combatant, in random order, tracking the running cost.
///
/// The plan is a function of (seed, turn, side), so a simulated match replays
/// identically.
#[derive(Debug, Clone)]
pub struct RandomActionProvider {
    seed: u64,
    /// Chance in percent that a combatant sits the turn out even when it could act.
    idle_percent: u32,
    /// Colored reserve above which surplus is sacrificed in pairs.
    hoard_limit: u32,
}

impl RandomActionProvider {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            idle_percent: 10,
            hoard_limit: 4,
        }
    }

    #[must_use]
    pub fn with_idle_percent(mut self, percent: u32) -> Self {
        self.idle_percent = percent.min(100);
        self
    }

    fn rng_for(&self, side: TeamSide, turn: u32) -> StdRng {
        let salt = match side {
            TeamSide::A => 0xa5a5_a5a5,
            TeamSide::B => 0x5a5a_5a5a,
        };
        StdRng::seed_from_u64(self.seed ^ u64::from(turn).wrapping_mul(0x9e37_79b9_7f4a_7c15) ^ salt)
    }

    /// Builds the plan synchronously. [`ActionProvider::provide`] wraps this.
    pub fn plan(&self, side: TeamSide, state: &MatchState) -> Submission {
        let mut rng = self.rng_for(side, state.turn);
        let player = state.player(side);
        let mut pool = economy::projected_pool(player, std::iter::empty::<&Skill>());

        let mut casters: Vec<&CombatantState> = player.living().collect();
        casters.shuffle(&mut rng);

        let mut actions = Vec::new();
        for caster in casters {
            if rng.gen_range(0..100) < self.idle_percent {
                continue;
            }

            let options: Vec<(&Skill, Vec<CombatantId>)> = caster
                .skills
                .iter()
                .filter(|skill| castable(state, caster, skill, &pool))
                .map(|skill| (skill, targets(state, caster.id, skill)))
                .filter(|(_, targets)| !targets.is_empty())
                .collect();

            let Some((skill, targets)) = options.choose(&mut rng) else {
                continue;
            };
            let Some(&target) = targets.choose(&mut rng) else {
                continue;
            };

            spend(&mut pool, &skill.cost);
            actions.push(MatchAction::new(caster.id, skill.id.clone(), target));
        }

        Submission::new(actions).with_burn(surplus(&pool, self.hoard_limit))
    }
}

#[async_trait]
impl ActionProvider for RandomActionProvider {
    async fn provide(&self, side: TeamSide, state: &MatchState) -> Result<Submission> {
        Ok(self.plan(side, state))
    }
}

fn castable(state: &MatchState, caster: &CombatantState, skill: &Skill, pool: &EnergyPool) -> bool {
    skill.category != WaveCategory::Passive
        && skill
            .usage_limit
            .is_none_or(|limit| state.skill_usage.count(caster.id, &skill.id) < limit)
        && economy::can_afford(pool, skill)
        && economy::caster_can_afford(state, caster.id, skill)
}

/// Legal targets for `skill` by its reach. Skills without a reach aim at enemies.
fn targets(state: &MatchState, caster: CombatantId, skill: &Skill) -> Vec<CombatantId> {
    let Some(reach) = skill.reach else {
        return state.player(caster.side.opponent()).living_ids();
    };
    let own = state.player(caster.side);
    if reach.targets_dead() {
        own.team.iter().filter(|c| !c.alive).map(|c| c.id).collect()
    } else if reach == arena_core::SkillReach::SelfOnly {
        vec![caster]
    } else if reach.targets_allies() {
        own.living_ids()
    } else {
        state.player(caster.side.opponent()).living_ids()
    }
}

/// Pairs of any colored energy held beyond `limit`.
fn surplus(pool: &EnergyPool, limit: u32) -> Vec<EnergyColor> {
    let mut burn = Vec::new();
    for color in EnergyColor::COLORED {
        let extra = pool.get(color).saturating_sub(limit);
        let pairs = extra / 2;
        burn.extend(std::iter::repeat_n(color, (pairs * 2) as usize));
    }
    burn
}
