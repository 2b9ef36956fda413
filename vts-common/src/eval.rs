//! Evaluation query registry
//!
//! Each demo dataset has a list of natural-language queries, one per
//! category, paired with the category that should rank first when the query
//! embedding is compared against the dataset's clip embeddings. The table is
//! static; ranking itself happens in the external evaluation harness.

use std::collections::BTreeMap;
use std::sync::Arc;

use once_cell::sync::Lazy;
use serde::Serialize;

use crate::dataset::Dataset;

/// One evaluation query
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EvalQuery {
    /// The text a user would type
    pub text: String,
    /// Category expected to rank highest
    pub target_category: String,
}

/// Queries for one demo dataset
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EvalDataset {
    /// Dataset the queries run against (not checked against the registry)
    pub demo_dataset: String,
    pub queries: Vec<EvalQuery>,
}

impl EvalDataset {
    /// Target categories with no clip in `dataset`
    pub fn missing_categories(&self, dataset: &Dataset) -> Vec<&str> {
        let present = dataset.categories();
        self.queries
            .iter()
            .map(|q| q.target_category.as_str())
            .filter(|c| !present.contains(c))
            .collect()
    }
}

/// Lookup table from demo dataset name to its eval queries
#[derive(Debug, Clone, Default)]
pub struct EvalRegistry {
    entries: BTreeMap<String, EvalDataset>,
}

impl EvalRegistry {
    /// Build a registry from `(dataset, [(text, target_category)])` tables
    pub fn from_tables<'a>(
        tables: impl IntoIterator<Item = (&'a str, &'a [(&'a str, &'a str)])>,
    ) -> Self {
        let entries = tables
            .into_iter()
            .map(|(name, queries)| {
                let entry = EvalDataset {
                    demo_dataset: name.to_string(),
                    queries: queries
                        .iter()
                        .map(|&(text, target)| EvalQuery {
                            text: text.to_string(),
                            target_category: target.to_string(),
                        })
                        .collect(),
                };
                (name.to_string(), entry)
            })
            .collect();
        Self { entries }
    }

    /// The built-in eval definitions, constructed once and shared
    pub fn builtin() -> &'static Arc<EvalRegistry> {
        static BUILTIN: Lazy<Arc<EvalRegistry>> =
            Lazy::new(|| Arc::new(EvalRegistry::from_tables(BUILTIN_TABLES.iter().copied())));
        &BUILTIN
    }

    pub fn get(&self, dataset_name: &str) -> Option<&EvalDataset> {
        self.entries.get(dataset_name)
    }

    /// Every dataset name with eval queries, sorted
    pub fn dataset_names(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

type QueryTable = &'static [(&'static str, &'static str)];

// Audio (ESC-50)

const SOUNDS_S: QueryTable = &[
    ("a dog barking", "dog"),
    ("a cat meowing", "cat"),
    ("a rooster crowing at dawn", "rooster"),
    ("church bells ringing", "church_bells"),
    ("crackling fire in a fireplace", "crackling_fire"),
];

const SOUNDS_M: QueryTable = &[
    ("a baby crying", "crying_baby"),
    ("people laughing", "laughing"),
    ("hands clapping", "clapping"),
    ("footsteps walking", "footsteps"),
    ("someone sneezing", "sneezing"),
    ("a chainsaw cutting wood", "chainsaw"),
    ("an airplane flying overhead", "airplane"),
    ("fireworks exploding", "fireworks"),
    ("a pig oinking", "pig"),
    ("a cow mooing", "cow"),
];

const SOUNDS_L: QueryTable = &[
    ("birds singing and chirping", "chirping_birds"),
    ("a crow cawing", "crow"),
    ("frogs croaking near a pond", "frog"),
    ("buzzing insects", "insects"),
    ("rain falling", "rain"),
    ("ocean waves crashing on shore", "sea_waves"),
    ("thunderstorm with loud thunder", "thunderstorm"),
    ("strong wind blowing", "wind"),
    ("dripping water drops", "water_drops"),
    ("crickets chirping at night", "crickets"),
    ("a car horn honking", "car_horn"),
    ("emergency siren wailing", "siren"),
    ("engine running and revving", "engine"),
    ("a train passing by on rails", "train"),
    ("helicopter flying overhead", "helicopter"),
    ("vacuum cleaner running", "vacuum_cleaner"),
    ("washing machine spinning", "washing_machine"),
    ("an alarm clock ringing", "clock_alarm"),
    ("someone typing on a keyboard", "keyboard_typing"),
    ("knocking on a wooden door", "door_wood_knock"),
];

// Image (Caltech-101)

const IMAGES_S: QueryTable = &[
    ("a photograph of a butterfly", "butterfly"),
    ("a photograph of a sunflower", "sunflower"),
    ("a photograph of a starfish", "starfish"),
    ("a photograph of a helicopter", "helicopter"),
];

const IMAGES_M: QueryTable = &[
    ("a photograph of a dolphin", "dolphin"),
    ("a photograph of a grand piano", "grand_piano"),
    ("a photograph of an elephant", "elephant"),
    ("a photograph of a kangaroo", "kangaroo"),
    ("a photograph of a laptop computer", "laptop"),
    ("a photograph of a lobster", "lobster"),
    ("a photograph of a wristwatch", "watch"),
    ("a photograph of a flamingo", "flamingo"),
];

const IMAGES_L: QueryTable = &[
    ("a photograph of a scorpion", "scorpion"),
    ("a photograph of a stop sign", "stop_sign"),
    ("a photograph of a chandelier", "chandelier"),
    ("a photograph of a rhinoceros", "rhino"),
    ("a photograph of a rooster", "rooster"),
    ("a photograph of a soccer ball", "soccer_ball"),
    ("a photograph of a yin-yang symbol", "yin_yang"),
    ("a photograph of a leopard", "leopards"),
    ("a photograph of a hawksbill sea turtle", "hawksbill"),
    ("a photograph of a revolver", "revolver"),
    ("a photograph of a schooner sailing ship", "schooner"),
    ("a photograph of an ibis bird", "ibis"),
    ("a photograph of a trilobite fossil", "trilobite"),
    ("a photograph of a ceiling fan", "ceiling_fan"),
    ("a photograph of a dalmatian dog", "dalmatian"),
];

// Text (20 Newsgroups)

const PARAGRAPHS_S: QueryTable = &[
    ("baseball games and athletic competition", "sports"),
    ("outer space exploration and astronomy", "science"),
];

const PARAGRAPHS_M: QueryTable = &[
    ("international politics and world affairs", "world"),
    ("buying and selling goods and products", "business"),
    ("computer graphics and rendering", "technology"),
    ("medical treatment and healthcare", "medicine"),
];

const PARAGRAPHS_L: QueryTable = &[
    ("automobiles and car reviews", "cars"),
    ("ice hockey games and NHL scores", "hockey"),
    ("electronic circuits and components", "electronics"),
    ("encryption and computer security", "crypto"),
    ("christian faith and religious practice", "religion"),
    ("firearms and gun control debate", "guns"),
    ("arguments about atheism and belief", "atheism"),
    ("apple macintosh hardware and troubleshooting", "mac"),
];

// Video (UCF-101)

const ACTIVITIES_VIDEO: QueryTable = &[
    ("someone applying eye makeup", "ApplyEyeMakeup"),
    ("someone applying lipstick", "ApplyLipstick"),
    ("someone brushing their teeth", "BrushingTeeth"),
    ("a person playing drums", "Drumming"),
    ("a person doing yo-yo tricks", "YoYo"),
];

const SPORTS_VIDEO: QueryTable = &[
    ("a person diving off a cliff", "CliffDiving"),
    ("someone walking on their hands", "HandstandWalking"),
    ("a person jumping rope", "JumpRope"),
    ("someone doing push-ups", "PushUps"),
    ("a person practicing tai chi", "TaiChi"),
];

const BUILTIN_TABLES: &[(&str, QueryTable)] = &[
    ("sounds_s", SOUNDS_S),
    ("sounds_m", SOUNDS_M),
    ("sounds_l", SOUNDS_L),
    ("images_s", IMAGES_S),
    ("images_m", IMAGES_M),
    ("images_l", IMAGES_L),
    ("paragraphs_s", PARAGRAPHS_S),
    ("paragraphs_m", PARAGRAPHS_M),
    ("paragraphs_l", PARAGRAPHS_L),
    ("activities_video", ACTIVITIES_VIDEO),
    ("sports_video", SPORTS_VIDEO),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clip::Clip;

    #[test]
    fn test_builtin_covers_all_demo_datasets() {
        let registry = EvalRegistry::builtin();
        assert_eq!(registry.len(), 11);
        assert_eq!(
            registry.dataset_names(),
            vec![
                "activities_video",
                "images_l",
                "images_m",
                "images_s",
                "paragraphs_l",
                "paragraphs_m",
                "paragraphs_s",
                "sounds_l",
                "sounds_m",
                "sounds_s",
                "sports_video",
            ]
        );
    }

    #[test]
    fn test_entries_reference_their_own_dataset() {
        let registry = EvalRegistry::builtin();
        for name in registry.dataset_names() {
            let entry = registry.get(name).unwrap();
            assert_eq!(entry.demo_dataset, name);
            assert!(!entry.queries.is_empty());
            assert!(entry.queries.iter().all(|q| !q.text.is_empty() && !q.target_category.is_empty()));
        }
    }

    #[test]
    fn test_query_order_is_preserved() {
        let entry = EvalRegistry::builtin().get("sounds_s").unwrap();
        assert_eq!(entry.queries.len(), 5);
        assert_eq!(
            entry.queries[0],
            EvalQuery { text: "a dog barking".to_string(), target_category: "dog".to_string() }
        );
        assert_eq!(entry.queries[4].target_category, "crackling_fire");
        assert_eq!(EvalRegistry::builtin().get("sounds_l").unwrap().queries.len(), 20);
    }

    #[test]
    fn test_builtin_is_built_once() {
        let shared = Arc::clone(EvalRegistry::builtin());
        assert!(Arc::ptr_eq(&shared, EvalRegistry::builtin()));
    }

    #[test]
    fn test_unknown_dataset_is_absent() {
        assert!(EvalRegistry::builtin().get("nonexistent").is_none());
        assert!(EvalRegistry::default().is_empty());
    }

    #[test]
    fn test_missing_categories() {
        let registry = EvalRegistry::from_tables([("pets", &[("a dog", "dog"), ("a cat", "cat")][..])]);
        let clips = vec![Clip {
            id: 1,
            category: "dog".to_string(),
            duration: 1.0,
            file_size: 1,
            embedding: vec![1.0],
            filename: "dog.wav".to_string(),
        }];
        let dataset = Dataset::new("pets", "/m", clips).unwrap();

        let entry = registry.get("pets").unwrap();
        assert_eq!(entry.missing_categories(&dataset), vec!["cat"]);
    }
}
