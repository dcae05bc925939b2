// src/present/mod.rs

use crate::lookup::Outcome;
use std::ops::{Deref, DerefMut};

pub mod html;
pub mod terminal;

pub use html::HtmlPresenter;
pub use terminal::TerminalPresenter;

/// Receives loading toggles and the outcome of each submission.
pub trait Presenter {
    fn set_loading(&mut self, loading: bool);
    fn present(&mut self, outcome: &Outcome);
}

impl<P: Presenter + ?Sized> Presenter for Box<P> {
    fn set_loading(&mut self, loading: bool) {
        (**self).set_loading(loading);
    }

    fn present(&mut self, outcome: &Outcome) {
        (**self).present(outcome);
    }
}

/// Holds the presenter in the loading state; clears it on drop.
pub struct Loading<'a, P: Presenter + ?Sized> {
    presenter: &'a mut P,
}

impl<'a, P: Presenter + ?Sized> Loading<'a, P> {
    pub fn begin(presenter: &'a mut P) -> Self {
        presenter.set_loading(true);
        Self { presenter }
    }
}

impl<P: Presenter + ?Sized> Deref for Loading<'_, P> {
    type Target = P;

    fn deref(&self) -> &P {
        self.presenter
    }
}

impl<P: Presenter + ?Sized> DerefMut for Loading<'_, P> {
    fn deref_mut(&mut self) -> &mut P {
        self.presenter
    }
}

impl<P: Presenter + ?Sized> Drop for Loading<'_, P> {
    fn drop(&mut self) {
        self.presenter.set_loading(false);
    }
}

/// Presenter that records every call, for tests and scripting.
#[derive(Debug, Default)]
pub struct RecordingPresenter {
    pub events: Vec<Event>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    Loading(bool),
    Presented(Outcome),
}

impl Presenter for RecordingPresenter {
    fn set_loading(&mut self, loading: bool) {
        self.events.push(Event::Loading(loading));
    }

    fn present(&mut self, outcome: &Outcome) {
        self.events.push(Event::Presented(outcome.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loading_cleared_on_drop() {
        let mut p = RecordingPresenter::default();
        {
            let mut guard = Loading::begin(&mut p);
            guard.present(&Outcome::NotFound("1".into()));
        }
        assert_eq!(
            p.events,
            vec![
                Event::Loading(true),
                Event::Presented(Outcome::NotFound("1".into())),
                Event::Loading(false),
            ]
        );
    }

    #[test]
    fn test_loading_cleared_on_unwind() {
        let mut p = RecordingPresenter::default();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = Loading::begin(&mut p);
            panic!("render failed");
        }));
        assert!(result.is_err());
        assert_eq!(p.events, vec![Event::Loading(true), Event::Loading(false)]);
    }
}
