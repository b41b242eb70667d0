//! Recording animation and hitbox sinks.
//!
//! Both sinks append every call to a shared log; keep a clone of the sink to
//! inspect what a combatant asked for.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use combat_core::AttackDescriptor;

use super::{AnimationSink, HitboxGroup};

/// One call made on an [`AnimationLog`].
#[derive(Debug, Clone, PartialEq)]
pub enum AnimationCall {
    Trigger(String),
    Bool(String, bool),
    Float(String, f32),
}

/// Animation sink that records calls instead of playing clips.
#[derive(Debug, Clone, Default)]
pub struct AnimationLog {
    calls: Rc<RefCell<Vec<AnimationCall>>>,
    clips: Rc<HashMap<String, f32>>,
}

impl AnimationLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares authored clip lengths reported by `clip_length`.
    pub fn with_clips(clips: impl IntoIterator<Item = (String, f32)>) -> Self {
        Self {
            calls: Rc::default(),
            clips: Rc::new(clips.into_iter().collect()),
        }
    }

    pub fn calls(&self) -> Vec<AnimationCall> {
        self.calls.borrow().clone()
    }

    /// Names of every trigger fired, in order.
    pub fn triggers(&self) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| match call {
                AnimationCall::Trigger(name) => Some(name.clone()),
                _ => None,
            })
            .collect()
    }

    /// Last value written to float parameter `name`.
    pub fn last_float(&self, name: &str) -> Option<f32> {
        self.calls.borrow().iter().rev().find_map(|call| match call {
            AnimationCall::Float(param, value) if param == name => Some(*value),
            _ => None,
        })
    }

    pub fn clear(&self) {
        self.calls.borrow_mut().clear();
    }
}

impl AnimationSink for AnimationLog {
    fn set_trigger(&mut self, name: &str) {
        self.calls
            .borrow_mut()
            .push(AnimationCall::Trigger(name.to_owned()));
    }

    fn set_bool(&mut self, name: &str, value: bool) {
        self.calls
            .borrow_mut()
            .push(AnimationCall::Bool(name.to_owned(), value));
    }

    fn set_float(&mut self, name: &str, value: f32) {
        self.calls
            .borrow_mut()
            .push(AnimationCall::Float(name.to_owned(), value));
    }

    fn clip_progress(&self) -> f32 {
        0.0
    }

    fn clip_length(&self, clip: &str) -> Option<f32> {
        self.clips.get(clip).copied()
    }
}

/// One call made on a [`HitboxLog`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HitboxCall {
    Activate(String),
    Deactivate,
    DeactivateHurtboxes,
}

/// Hitbox group that records activation calls.
#[derive(Debug, Clone, Default)]
pub struct HitboxLog {
    calls: Rc<RefCell<Vec<HitboxCall>>>,
}

impl HitboxLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<HitboxCall> {
        self.calls.borrow().clone()
    }

    /// Returns true if activations and deactivations strictly alternate,
    /// starting with an activation, and nothing is left active.
    pub fn is_balanced(&self) -> bool {
        let mut active = false;
        for call in self.calls.borrow().iter() {
            match call {
                HitboxCall::Activate(_) if active => return false,
                HitboxCall::Activate(_) => active = true,
                HitboxCall::Deactivate if !active => return false,
                HitboxCall::Deactivate => active = false,
                HitboxCall::DeactivateHurtboxes => {}
            }
        }
        !active
    }

    /// Number of activations recorded.
    pub fn activations(&self) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|call| matches!(call, HitboxCall::Activate(_)))
            .count()
    }

    pub fn clear(&self) {
        self.calls.borrow_mut().clear();
    }
}

impl HitboxGroup for HitboxLog {
    fn activate(&mut self, attack: &AttackDescriptor) {
        self.calls
            .borrow_mut()
            .push(HitboxCall::Activate(attack.name.clone()));
    }

    fn deactivate(&mut self) {
        self.calls.borrow_mut().push(HitboxCall::Deactivate);
    }

    fn deactivate_hurtboxes(&mut self) {
        self.calls.borrow_mut().push(HitboxCall::DeactivateHurtboxes);
    }
}
