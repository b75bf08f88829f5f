//! The party roster: living members, their activity states, and the dead.
//!
//! The roster is the only owner of [`Activity`] entries. Every living member
//! has exactly one entry; dead members have none and are moved to the
//! memorial list, from which they never return.

use std::collections::{BTreeMap, BTreeSet};

use holdout_types::{Activity, ActionKind, FallenMember, MemberId, PartyMember};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::actions::{duration_hours, is_always_allowed};
use crate::config::VitalsConfig;
use crate::death::memorialize;
use crate::error::PartyError;
use crate::member::{create_member, pick_name};
use crate::vitals::{adjust_health, apply_vital_tick};

/// Outcome of the vitals step for the whole party.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VitalsReport {
    /// Members who died this tick, in party order.
    pub deaths: Vec<FallenMember>,
    /// Members who finished resting this tick: `(id, name)`.
    pub rested: Vec<(MemberId, String)>,
}

/// Living party members and everything tracked per member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartyRoster {
    /// Living members in recruitment order.
    members: Vec<PartyMember>,
    /// Activity state of each living member.
    activities: BTreeMap<MemberId, Activity>,
    /// Members who died this run.
    fallen: Vec<FallenMember>,
    /// Every name handed out this run, the dead included.
    used_names: BTreeSet<String>,
    /// Current energy cost of a gathering action.
    gather_energy_cost: f64,
}

impl PartyRoster {
    /// Create an empty roster with the given gathering energy cost.
    pub const fn new(gather_energy_cost: f64) -> Self {
        Self {
            members: Vec::new(),
            activities: BTreeMap::new(),
            fallen: Vec::new(),
            used_names: BTreeSet::new(),
            gather_energy_cost,
        }
    }

    // -----------------------------------------------------------------------
    // Membership
    // -----------------------------------------------------------------------

    /// Create a new member with a fresh name and sampled traits.
    ///
    /// # Errors
    ///
    /// Returns [`PartyError::NoNamesLeft`] when the name pool is exhausted.
    pub fn recruit<R: Rng>(&mut self, config: &VitalsConfig, rng: &mut R) -> Result<MemberId, PartyError> {
        let name = pick_name(&self.used_names, rng)?;
        let member = create_member(name.clone(), config, rng);
        let id = member.id;
        debug!(%id, name, max_energy = member.traits.max_energy, "Member recruited");
        self.used_names.insert(name);
        self.activities.insert(id, Activity::Idle);
        self.members.push(member);
        Ok(id)
    }

    /// Living members in recruitment order.
    pub fn members(&self) -> &[PartyMember] {
        &self.members
    }

    /// Mutable access to living members. The roster length cannot change
    /// through this slice.
    pub fn members_mut(&mut self) -> &mut [PartyMember] {
        &mut self.members
    }

    /// Look up a living member.
    pub fn member(&self, id: MemberId) -> Option<&PartyMember> {
        self.members.iter().find(|m| m.id == id)
    }

    /// Look up a living member mutably.
    pub fn member_mut(&mut self, id: MemberId) -> Option<&mut PartyMember> {
        self.members.iter_mut().find(|m| m.id == id)
    }

    /// A uniformly chosen living member, if any.
    pub fn random_member_mut<R: Rng>(&mut self, rng: &mut R) -> Option<&mut PartyMember> {
        if self.members.is_empty() {
            return None;
        }
        let index = rng.random_range(0..self.members.len());
        self.members.get_mut(index)
    }

    /// Number of living members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the whole party is dead (or was never formed).
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Members who died this run.
    pub fn fallen(&self) -> &[FallenMember] {
        &self.fallen
    }

    /// Whether any name is still available for a new member.
    pub fn has_free_name(&self) -> bool {
        self.used_names.len() < crate::member::NAMES.len()
    }

    // -----------------------------------------------------------------------
    // Activity
    // -----------------------------------------------------------------------

    /// Current activity of a living member.
    pub fn activity(&self, id: MemberId) -> Option<Activity> {
        self.activities.get(&id).copied()
    }

    /// All activity entries, keyed by member.
    pub const fn activities(&self) -> &BTreeMap<MemberId, Activity> {
        &self.activities
    }

    /// Check that `id` may start `kind` at absolute hour `now`.
    ///
    /// # Errors
    ///
    /// - [`PartyError::MemberNotFound`] if no living member has that ID
    /// - [`PartyError::MemberBusy`] if resting or busy past `now`
    /// - [`PartyError::MemberExhausted`] if out of energy and the action
    ///   is not eat, drink or sleep
    pub fn check_available(&self, id: MemberId, kind: ActionKind, now: u64) -> Result<&PartyMember, PartyError> {
        let member = self.member(id).ok_or(PartyError::MemberNotFound(id))?;
        let activity = self.activity(id).unwrap_or_default();
        if activity.blocks_at(now) {
            return Err(PartyError::MemberBusy {
                name: member.name.clone(),
            });
        }
        if member.energy <= 0.0 && !is_always_allowed(kind) {
            return Err(PartyError::MemberExhausted {
                name: member.name.clone(),
            });
        }
        Ok(member)
    }

    /// Record that `id` started `kind` at `now`.
    ///
    /// Sleep enters [`Activity::Resting`]; everything else is busy until
    /// `now + duration`. Call [`check_available`](Self::check_available)
    /// first; this only updates the state entry.
    ///
    /// # Errors
    ///
    /// Returns [`PartyError::MemberNotFound`] if no living member has that ID.
    pub fn commit(&mut self, id: MemberId, kind: ActionKind, now: u64) -> Result<Activity, PartyError> {
        let entry = self
            .activities
            .get_mut(&id)
            .ok_or(PartyError::MemberNotFound(id))?;
        let next = duration_hours(kind).map_or(Activity::Resting, |hours| {
            Activity::BusyUntil(now.saturating_add(hours))
        });
        *entry = next;
        Ok(next)
    }

    /// The idle member with the most energy, ties going to the earliest
    /// recruit.
    pub fn best_available(&self, now: u64) -> Option<MemberId> {
        let mut best: Option<&PartyMember> = None;
        for member in &self.members {
            let free = !self.activity(member.id).unwrap_or_default().blocks_at(now);
            if free && best.is_none_or(|b| member.energy > b.energy) {
                best = Some(member);
            }
        }
        best.map(|m| m.id)
    }

    /// Return every member whose busy deadline has been reached to idle.
    ///
    /// Returns the IDs that changed, in ID order.
    pub fn resolve_expired(&mut self, now: u64) -> Vec<MemberId> {
        let mut freed = Vec::new();
        for (id, activity) in &mut self.activities {
            if let Activity::BusyUntil(until) = *activity
                && until <= now
            {
                *activity = Activity::Idle;
                freed.push(*id);
            }
        }
        freed
    }

    // -----------------------------------------------------------------------
    // Tick
    // -----------------------------------------------------------------------

    /// Apply one tick of vitals to every living member.
    ///
    /// Members who finish resting go idle. Members who die are removed,
    /// lose their activity entry and are memorialized at `day`/`hour`.
    /// Survivors then regain `heal` health (0 when there is no medical tent).
    pub fn tick_vitals(&mut self, now: u64, day: u32, hour: u32, config: &VitalsConfig, heal: f64) -> VitalsReport {
        let mut report = VitalsReport::default();

        for member in &mut self.members {
            let activity = self.activities.get(&member.id).copied().unwrap_or_default();
            let result = apply_vital_tick(member, activity, now, config);
            if let Some(cause) = result.death {
                report.deaths.push(memorialize(member, cause, day, hour));
            } else if result.rested {
                self.activities.insert(member.id, Activity::Idle);
                report.rested.push((member.id, member.name.clone()));
            }
        }

        for dead in &report.deaths {
            self.activities.remove(&dead.id);
            self.members.retain(|m| m.id != dead.id);
            self.fallen.push(dead.clone());
        }

        if heal > 0.0 {
            for member in &mut self.members {
                adjust_health(member, heal, 0.0);
            }
        }

        report
    }

    // -----------------------------------------------------------------------
    // Modifiers
    // -----------------------------------------------------------------------

    /// Energy cost of a gathering action.
    pub const fn gather_energy_cost(&self) -> f64 {
        self.gather_energy_cost
    }

    /// Lower the gathering energy cost by `amount`, never below `floor`.
    ///
    /// Returns the new cost.
    pub fn reduce_gather_energy_cost(&mut self, amount: f64, floor: f64) -> f64 {
        self.gather_energy_cost = (self.gather_energy_cost - amount).max(floor);
        self.gather_energy_cost
    }
}
