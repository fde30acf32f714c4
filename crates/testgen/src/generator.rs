use chrono::{DateTime, Duration, Local};
use fdnorm_core::{AttributeSet, Relation};
use rand::distr::{Distribution, Uniform};
use rand::RngExt;
use rayon::iter::{IntoParallelIterator, ParallelIterator};
use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

#[derive(Clone, Debug, Default, Deserialize, Serialize, TypedBuilder)]
pub struct SchemaParams {
    pub id: u64,
    pub n_attribute: u64,
    pub n_dependency: u64,
    #[builder(default = 2)]
    pub max_lhs: u64,
    #[builder(default = 2)]
    pub max_rhs: u64,
}

#[derive(Deserialize, Serialize, Debug)]
pub struct GeneratedSchema {
    params: SchemaParams,
    info: String,
    start: DateTime<Local>,
    end: DateTime<Local>,
    relation: Relation,
}

impl GeneratedSchema {
    #[must_use]
    pub const fn get_id(&self) -> u64 {
        self.params.id
    }

    #[must_use]
    pub const fn get_relation(&self) -> &Relation {
        &self.relation
    }

    #[must_use]
    pub const fn get_params(&self) -> &SchemaParams {
        &self.params
    }

    #[must_use]
    pub fn get_duration(&self) -> Duration {
        self.end - self.start
    }
}

/// Name of the `index`-th generated attribute: `a`..`z`, then `a1`..`z1`, ...
#[must_use]
pub fn attribute_name(index: u64) -> String {
    let letter = char::from(b'a' + u8::try_from(index % 26).unwrap_or_default());
    match index / 26 {
        0 => letter.to_string(),
        round => format!("{letter}{round}"),
    }
}

/// Generate a relation named `name` over `n_attribute` attributes with up to
/// `n_dependency` random dependencies.
///
/// Each dependency draws between 1 and `max_lhs` left-hand attributes and
/// between 1 and `max_rhs` right-hand attributes. Draws may repeat, and the
/// relation filters trivial dependencies and merges equal left-hand sides, so
/// the result can hold fewer dependencies than requested.
#[must_use]
pub fn generate_single_relation(
    name: &str,
    n_attribute: u64,
    n_dependency: u64,
    max_lhs: u64,
    max_rhs: u64,
) -> Relation {
    let attributes: AttributeSet = (0..n_attribute).map(attribute_name).collect();
    let mut relation = Relation::with_attributes(name, attributes);

    let (Ok(attribute_range), Ok(lhs_size), Ok(rhs_size)) = (
        Uniform::new(0, n_attribute),
        Uniform::new_inclusive(1, max_lhs.max(1)),
        Uniform::new_inclusive(1, max_rhs.max(1)),
    ) else {
        return relation;
    };
    let mut random_generator = rand::rng();

    let mut draw = |size: &Uniform<u64>| -> AttributeSet {
        let count = size.sample(&mut random_generator);
        (0..count)
            .map(|_| attribute_name(attribute_range.sample(&mut random_generator)))
            .collect()
    };

    let dependencies: Vec<(AttributeSet, AttributeSet)> = (0..n_dependency)
        .map(|_| (draw(&lhs_size), draw(&rhs_size)))
        .collect();
    relation.add_dependencies(dependencies, fdnorm_core::AttributeMode::Restrict);

    // Occasionally keep one attribute out of every dependency.
    if n_attribute > 1 && random_generator.random::<bool>() {
        relation.add_attribute(attribute_name(n_attribute));
    }

    relation
}

#[must_use]
pub fn generate_mult_relations(n_schema: u64, params: &SchemaParams) -> Vec<GeneratedSchema> {
    (0..n_schema)
        .into_par_iter()
        .map(|i_schema| {
            let start_time = Local::now();
            let relation = generate_single_relation(
                &format!("R{i_schema}"),
                params.n_attribute,
                params.n_dependency,
                params.max_lhs,
                params.max_rhs,
            );
            let end_time = Local::now();
            GeneratedSchema {
                params: SchemaParams {
                    id: i_schema,
                    ..params.clone()
                },
                info: "generated".to_string(),
                start: start_time,
                end: end_time,
                relation,
            }
        })
        .collect()
}
