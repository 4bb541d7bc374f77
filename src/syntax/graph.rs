use std::collections::BTreeSet;
use crate::error::PipelineError;
use crate::image::GrayImage;
use crate::syntax::*;

/// What a stage computes.
#[derive(Debug, Clone)]
pub enum Definition {
    /// An image provided as an input.
    Input(GrayImage),
    /// A pure function of the coordinate and of earlier stages.
    Pure(Expr),
    /// A bounded tuple recurrence, reporting its escape index.
    Recurrence(Recurrence)
}

#[derive(Debug, Clone)]
pub struct Stage {
    pub name: String,
    pub definition: Definition
}

impl Stage {
    /// Returns the ids of all the stages this stage reads from,
    /// without duplicates and in ascending order.
    pub fn sources(&self) -> Vec<StageId> {
        let sources = match &self.definition {
            Definition::Input(_) => vec![],
            Definition::Pure(e) => e.sources(),
            Definition::Recurrence(r) => r.sources()
        };
        let unique: BTreeSet<StageId> = sources.into_iter().collect();
        unique.into_iter().collect()
    }

    pub fn params(&self) -> Vec<String> {
        match &self.definition {
            Definition::Input(_) => vec![],
            Definition::Pure(e) => e.params(),
            Definition::Recurrence(r) => r.params()
        }
    }
}

impl PrettyPrint for Stage {
    fn pretty_print(&self) -> String {
        match &self.definition {
            Definition::Input(i) => {
                use crate::image::Image;
                let (w, h, c) = i.dimensions();
                format!("{}: input {}x{}x{}", self.name, w, h, c)
            },
            Definition::Pure(e) => format!("{}(x, y, c) = {}", self.name, e.pretty_print()),
            Definition::Recurrence(r) => format!(
                "{}(x, y) = {}; for r in [1, {}]: {}(x, y) = {} while {}",
                self.name,
                pretty_print_tuple(&r.init),
                r.iterations,
                self.name,
                pretty_print_tuple(&r.update),
                r.predicate.pretty_print()
            )
        }
    }

    fn is_leaf(&self) -> bool {
        true
    }
}

/// A directed acyclic graph of stages. Stages can only read from stages
/// defined before them, so the stage list is always in a valid
/// dependency order.
#[derive(Debug, Clone)]
pub struct Pipeline {
    pub name: String,
    id: PipelineId,
    stages: Vec<Stage>
}

impl Pipeline {
    pub fn new(name: &str) -> Pipeline {
        Pipeline { name: name.to_string(), id: PipelineId::fresh(), stages: vec![] }
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    /// Returns `None` if `id` isn't a stage of this pipeline.
    pub fn stage(&self, id: StageId) -> Option<&Stage> {
        self.stages.get(id.0)
    }

    /// Looks up a stage whose id has already been checked.
    pub(crate) fn stage_at(&self, id: StageId) -> &Stage {
        &self.stages[id.0]
    }

    /// Adds an input image.
    pub fn input(&mut self, name: &str, image: GrayImage) -> Func {
        self.push(name, Definition::Input(image))
    }

    /// Adds a pure stage. Recurrence state can't be referred to outside a
    /// recurrence.
    pub fn define(&mut self, name: &str, definition: Expr) -> Result<Func, PipelineError> {
        if let Some(k) = definition.max_state() {
            return Err(PipelineError::InvalidDefinition {
                name: name.to_string(),
                reason: format!("prev[{}] is only defined inside a recurrence", k)
            });
        }
        self.check_accesses(&definition.accesses())?;
        Ok(self.push(name, Definition::Pure(definition)))
    }

    /// Adds a recurrence stage. The state tuple must be non-empty, `update` must
    /// have one expression per state component, and no expression may refer to
    /// a state component that doesn't exist.
    pub fn define_recurrence(&mut self, name: &str, recurrence: Recurrence) -> Result<Func, PipelineError> {
        let invalid = |reason: String| PipelineError::InvalidRecurrence { name: name.to_string(), reason };

        let arity = recurrence.init.len();
        if arity == 0 {
            return Err(invalid("state tuple is empty".to_string()));
        }
        if recurrence.update.len() != arity {
            return Err(invalid(format!(
                "update has {} components but the state has {}", recurrence.update.len(), arity
            )));
        }
        if recurrence.iterations == 0 {
            return Err(invalid("iteration count must be positive".to_string()));
        }
        if let Some(k) = recurrence.init.iter().filter_map(|e| e.max_state()).max() {
            return Err(invalid(format!("initial state refers to prev[{}]", k)));
        }
        let used = recurrence.update.iter()
            .chain(std::iter::once(&recurrence.predicate))
            .filter_map(|e| e.max_state())
            .max();
        if let Some(k) = used.filter(|k| *k >= arity) {
            return Err(invalid(format!("prev[{}] is out of range for a state of size {}", k, arity)));
        }

        self.check_accesses(&recurrence.accesses())?;
        Ok(self.push(name, Definition::Recurrence(recurrence)))
    }

    /// Returns the stages that `output` depends on, including itself,
    /// in dependency order.
    pub fn schedule(&self, output: &Func) -> Result<Vec<StageId>, PipelineError> {
        self.check_handle(output.pipeline, output.id, &output.name)?;
        let mut reachable = BTreeSet::new();
        let mut pending = vec![output.id];
        while let Some(id) = pending.pop() {
            if reachable.insert(id) {
                pending.extend(self.stage_at(id).sources());
            }
        }
        // Ids increase along every edge, so ascending order is a topological order
        let schedule: Vec<StageId> = reachable.into_iter().collect();
        log::trace!(
            "Schedule for {}: {}",
            output.name,
            schedule.iter().map(|id| self.stage_at(*id).name.as_str()).collect::<Vec<_>>().join(", ")
        );
        Ok(schedule)
    }

    /// Returns the names of the params needed to realize `output`, in
    /// lexicographic order.
    pub fn params(&self, output: &Func) -> Result<Vec<String>, PipelineError> {
        let params: BTreeSet<String> = self.schedule(output)?
            .into_iter()
            .flat_map(|id| self.stage_at(id).params())
            .collect();
        Ok(params.into_iter().collect())
    }

    fn push(&mut self, name: &str, definition: Definition) -> Func {
        let id = StageId(self.stages.len());
        self.stages.push(Stage { name: name.to_string(), definition });
        Func { pipeline: self.id, id, name: name.to_string() }
    }

    /// Handles are only valid for stages already in this pipeline.
    fn check_handle(&self, pipeline: PipelineId, id: StageId, name: &str) -> Result<(), PipelineError> {
        if pipeline != self.id || id.0 >= self.stages.len() {
            return Err(PipelineError::UnknownStage { pipeline: self.name.clone(), name: name.to_string() });
        }
        Ok(())
    }

    fn check_accesses(&self, accesses: &[&Access]) -> Result<(), PipelineError> {
        accesses.iter().try_for_each(|a| self.check_handle(a.pipeline, a.stage, &a.name))
    }
}

impl PrettyPrint for Pipeline {
    fn pretty_print(&self) -> String {
        let lines: Vec<String> = self.stages.iter().map(|s| s.pretty_print()).collect();
        lines.join("\n")
    }

    fn is_leaf(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eval::ScalarType;

    fn pipeline() -> (Pipeline, Func, Func, Func) {
        let (x, y, c) = (Var::X, Var::Y, Var::C);
        let mut p = Pipeline::new("test");
        let input = p.input("input", GrayImage::new(2, 2, 1));
        let unused = p.define("unused", input.at(x, y, c) * 3).unwrap();
        let out = p.define("out", cast(ScalarType::U8, input.at(x + 1, y, c) + input.at(x, y, c))).unwrap();
        (p, input, unused, out)
    }

    #[test]
    fn test_schedule_only_contains_reachable_stages() {
        let (p, input, unused, out) = pipeline();
        assert_eq!(p.schedule(&out).unwrap(), vec![input.id(), out.id()]);
        assert_eq!(p.schedule(&unused).unwrap(), vec![input.id(), unused.id()]);
        assert_eq!(p.stage_at(out.id()).sources(), vec![input.id()]);
    }

    #[test]
    fn test_foreign_handles_are_rejected() {
        let (x, y, c) = (Var::X, Var::Y, Var::C);
        let (mut p, ..) = pipeline();
        let mut other = Pipeline::new("other");
        for i in 0..5 {
            other.input(&format!("i{}", i), GrayImage::new(1, 1, 1));
        }
        let late = other.define("late", Expr::Int(0)).unwrap();

        match p.define("bad", late.at(x, y, c)) {
            Err(PipelineError::UnknownStage { pipeline, .. }) => assert_eq!(pipeline, "test"),
            r => panic!("unexpected result {:?}", r)
        }
        assert!(p.schedule(&late).is_err());
    }

    #[test]
    fn test_foreign_handles_with_valid_indices_are_rejected() {
        let (x, y, c) = (Var::X, Var::Y, Var::C);
        let mut p = Pipeline::new("mine");
        p.input("mine", GrayImage::new(2, 1, 1));
        let mut other = Pipeline::new("other");
        let foreign = other.input("foreign", GrayImage::new(2, 1, 1));
        assert_eq!(foreign.id(), StageId(0));

        match p.define("f", foreign.at(x, y, c)) {
            Err(PipelineError::UnknownStage { pipeline, name }) => {
                assert_eq!(pipeline, "mine");
                assert_eq!(name, "foreign");
            },
            r => panic!("unexpected result {:?}", r)
        }
        assert!(p.schedule(&foreign).is_err());
    }

    #[test]
    fn test_state_outside_a_recurrence_is_rejected() {
        let mut p = Pipeline::new("state");
        match p.define("f", state(3) + 5) {
            Err(PipelineError::InvalidDefinition { name, .. }) => assert_eq!(name, "f"),
            r => panic!("unexpected result {:?}", r)
        }
        assert!(p.stages().is_empty());
    }

    #[test]
    fn test_stage_lookup_is_checked() {
        let (p, input, ..) = pipeline();
        assert_eq!(p.stage(input.id()).map(|s| s.name.as_str()), Some("input"));
        assert!(p.stage(StageId(99)).is_none());
    }

    #[test]
    fn test_params_are_sorted_and_deduplicated() {
        let (x, y, c) = (Var::X, Var::Y, Var::C);
        let mut p = Pipeline::new("params");
        let (b, a) = (Param::new("b"), Param::new("a"));
        let input = p.input("input", GrayImage::new(1, 1, 1));
        let f = p.define("f", input.at(x, y, c) + &b + &a).unwrap();
        let g = p.define("g", f.at(x, y, c) * &b).unwrap();
        assert_eq!(p.params(&g).unwrap(), vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_malformed_recurrences_are_rejected() {
        let mut p = Pipeline::new("rec");
        let valid = Recurrence {
            init: vec![Expr::Float(0.0)],
            update: vec![state(0) + 1.0f32],
            iterations: 4,
            predicate: lt(state(0), 2.0f32)
        };
        assert!(p.define_recurrence("ok", valid.clone()).is_ok());

        let cases = vec![
            Recurrence { init: vec![], update: vec![], ..valid.clone() },
            Recurrence { update: vec![state(0), state(0)], ..valid.clone() },
            Recurrence { iterations: 0, ..valid.clone() },
            Recurrence { init: vec![state(0)], ..valid.clone() },
            Recurrence { predicate: lt(state(1), 2.0f32), ..valid.clone() }
        ];
        for case in cases {
            match p.define_recurrence("bad", case) {
                Err(PipelineError::InvalidRecurrence { name, .. }) => assert_eq!(name, "bad"),
                r => panic!("unexpected result {:?}", r)
            }
        }
    }

    #[test]
    fn test_pipeline_pretty_print() {
        let (p, ..) = pipeline();
        assert_eq!(
            p.pretty_print(),
            "input: input 2x2x1\n\
             unused(x, y, c) = input(x, y, c) * 3\n\
             out(x, y, c) = u8(input(x + 1, y, c) + input(x, y, c))"
        );
    }
}
