use super::*;
use crate::query::{Location, write_params};

/// Controller plus the resources its effects act on.
pub struct Dashboard<D: FetchDispatcher> {
    controller: ComparisonController,
    location: Location,
    dispatcher: D,
}

impl<D: FetchDispatcher> Dashboard<D> {
    pub fn mount(kind: ComparisonKind, location: Location, dispatcher: D) -> Self {
        let (controller, effects) = ComparisonController::mount(kind, location.query());
        let mut dashboard = Self {
            controller,
            location,
            dispatcher,
        };
        dashboard.run_effects(effects);
        dashboard
    }

    pub fn controller(&self) -> &ComparisonController {
        &self.controller
    }

    pub fn params(&self) -> &ComparisonParameters {
        self.controller.params()
    }

    pub fn state(&self) -> &ComparisonState {
        self.controller.state()
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn dispatcher(&self) -> &D {
        &self.dispatcher
    }

    pub fn change(&mut self, change: ParamChange) {
        let effects = self.controller.apply(change);
        self.run_effects(effects);
    }

    pub fn reload(&mut self) {
        let effects = self.controller.reload();
        self.run_effects(effects);
    }

    pub fn complete(
        &mut self,
        generation: u64,
        result: Result<ComparisonResult, FetchError>,
    ) -> bool {
        self.controller.complete(generation, result)
    }

    fn run_effects(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::WriteLocation(params) => {
                    let query = write_params(self.controller.kind(), self.location.query(), &params);
                    self.location.navigate(query);
                }
                Effect::IssueFetch(request) => self.dispatcher.dispatch(request),
            }
        }
    }
}
