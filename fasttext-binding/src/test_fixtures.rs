//! Shared Test Fixtures for fasttext-binding
//!
//! A deterministic in-memory engine plus helpers that write model and vectors
//! files on the fly, so every layer can be tested without a real fastText
//! model.

#[cfg(test)]
pub mod fixtures {
    use crate::core::file_format::{FASTTEXT_FILEFORMAT_MAGIC_INT32, FASTTEXT_VERSION};
    use crate::core::unified_error::EngineError;
    use crate::engine::{Engine, Prediction, Vocabulary, UNKNOWN_WORD_ID};
    use crate::ffi::model::ModelHandle;
    use rstest::*;
    use serde::{Deserialize, Serialize};
    use std::collections::HashMap;
    use std::fs;
    use std::io::{BufRead, Read, Write};
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    /// Text that makes the test engine return an error from `predict`
    pub const FAIL_TEXT: &str = "__fail__";
    /// Text that makes the test engine panic inside `predict`
    pub const PANIC_TEXT: &str = "__panic__";
    pub const FAIL_MESSAGE: &str = "prediction failed on purpose";
    pub const PANIC_MESSAGE: &str = "engine exploded";

    pub const SAMPLE_DIM: i32 = 4;
    pub const SAMPLE_WORD: &str = "златом";
    pub const SAMPLE_WORD_ID: i32 = 1;

    /// Model body stored after the 8-byte header
    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
    pub struct TestModelSpec {
        pub dim: i32,
        pub words: Vec<String>,
        pub labels: Vec<String>,
        #[serde(default)]
        pub fail_load: bool,
        #[serde(default)]
        pub fail_vectors: bool,
    }

    #[derive(Debug)]
    pub struct TestVocabulary {
        words: Vec<String>,
    }

    impl Vocabulary for TestVocabulary {
        fn word_id(&self, word: &str) -> i32 {
            self.words
                .iter()
                .position(|w| w == word)
                .map(|id| id as i32)
                .unwrap_or(UNKNOWN_WORD_ID)
        }

        fn word(&self, id: i32) -> &str {
            usize::try_from(id)
                .ok()
                .and_then(|id| self.words.get(id))
                .map(String::as_str)
                .unwrap_or("")
        }

        fn nwords(&self) -> i32 {
            self.words.len() as i32
        }
    }

    /// Engine whose outputs are pure functions of its inputs
    #[derive(Debug, Default)]
    pub struct TestEngine {
        spec: Option<TestModelSpec>,
        vocabulary: Option<TestVocabulary>,
        vectors: HashMap<String, Vec<f32>>,
    }

    impl TestEngine {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn loaded_vectors(&self) -> usize {
            self.vectors.len()
        }
    }

    /// Vector of an out-of-vocabulary word: `out[i] = len(word) + i / 2`.
    pub fn synthetic_word_vector(word: &str, dim: usize) -> Vec<f32> {
        (0..dim)
            .map(|i| word.chars().count() as f32 + i as f32 * 0.5)
            .collect()
    }

    /// Score of the label at `rank`.
    pub fn label_score(rank: usize) -> f32 {
        1.0 / (rank as f32 + 2.0)
    }

    impl Engine for TestEngine {
        fn load_model(&mut self, reader: &mut dyn BufRead) -> Result<(), EngineError> {
            let mut body = String::new();
            reader
                .read_to_string(&mut body)
                .map_err(|e| EngineError::new(format!("reading model body: {}", e)))?;
            let spec: TestModelSpec = serde_json::from_str(&body)
                .map_err(|e| EngineError::new(format!("parsing model body: {}", e)))?;
            if spec.fail_load {
                return Err(EngineError::new("corrupted model body"));
            }

            self.vocabulary = Some(TestVocabulary {
                words: spec.words.clone(),
            });
            self.vectors.clear();
            self.spec = Some(spec);
            Ok(())
        }

        fn load_vectors(&mut self, path: &Path) -> Result<(), EngineError> {
            if self.spec.as_ref().map_or(false, |spec| spec.fail_vectors) {
                return Err(EngineError::new("corrupted vectors"));
            }
            let content = fs::read_to_string(path).map_err(|e| EngineError::new(e.to_string()))?;
            for line in content.lines().skip(1) {
                let mut parts = line.split_whitespace();
                let Some(word) = parts.next() else { continue };
                let values = parts
                    .map(str::parse::<f32>)
                    .collect::<Result<Vec<_>, _>>()
                    .map_err(|e| EngineError::new(e.to_string()))?;
                self.vectors.insert(word.to_string(), values);
            }
            Ok(())
        }

        fn dimension(&self) -> i32 {
            self.spec.as_ref().map_or(0, |spec| spec.dim)
        }

        fn dictionary(&self) -> Option<&dyn Vocabulary> {
            self.vocabulary.as_ref().map(|v| v as &dyn Vocabulary)
        }

        fn word_vector(&self, word: &str, out: &mut [f32]) {
            match self.vectors.get(word) {
                Some(values) => {
                    for (slot, value) in out.iter_mut().zip(values) {
                        *slot = *value;
                    }
                }
                None => out.copy_from_slice(&synthetic_word_vector(word, out.len())),
            }
        }

        fn sentence_vector(&self, text: &str, out: &mut [f32]) {
            let words: Vec<&str> = text.split_whitespace().collect();
            if words.is_empty() {
                return;
            }
            let mut buf = vec![0.0f32; out.len()];
            for word in &words {
                self.word_vector(word, &mut buf);
                for (slot, value) in out.iter_mut().zip(&buf) {
                    *slot += value / words.len() as f32;
                }
            }
        }

        fn predict(&self, text: &str, k: i32) -> Result<Vec<Prediction>, EngineError> {
            match text {
                FAIL_TEXT => return Err(EngineError::new(FAIL_MESSAGE)),
                PANIC_TEXT => panic!("{}", PANIC_MESSAGE),
                _ => {}
            }
            let labels = self.spec.as_ref().map(|s| s.labels.as_slice()).unwrap_or(&[]);
            let take = if k < 0 { labels.len() } else { k as usize };
            Ok(labels
                .iter()
                .take(take)
                .enumerate()
                .map(|(rank, label)| (label_score(rank), label.clone()))
                .collect())
        }
    }

    pub fn test_engine_factory() -> Box<dyn Engine> {
        Box::new(TestEngine::new())
    }

    /// Write an 8-byte header followed by `body`.
    pub fn write_raw_model(dir: &Path, name: &str, magic: i32, version: i32, body: &[u8]) -> PathBuf {
        let path = dir.join(name);
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(&magic.to_ne_bytes()).unwrap();
        file.write_all(&version.to_ne_bytes()).unwrap();
        file.write_all(body).unwrap();
        path
    }

    /// Write a well-formed model file for [`TestEngine`].
    pub fn write_model_file(dir: &Path, name: &str, spec: &TestModelSpec) -> PathBuf {
        let body = serde_json::to_vec(spec).unwrap();
        write_raw_model(
            dir,
            name,
            FASTTEXT_FILEFORMAT_MAGIC_INT32,
            FASTTEXT_VERSION,
            &body,
        )
    }

    /// Write a text vectors file declaring `dim` with one row per entry.
    pub fn write_vectors_file(
        dir: &Path,
        name: &str,
        dim: i64,
        entries: &[(&str, Vec<f32>)],
    ) -> PathBuf {
        let path = dir.join(name);
        let mut content = format!("{} {}\n", entries.len(), dim);
        for (word, values) in entries {
            let values: Vec<String> = values.iter().map(|v| v.to_string()).collect();
            content.push_str(&format!("{} {}\n", word, values.join(" ")));
        }
        fs::write(&path, content).unwrap();
        path
    }

    #[fixture]
    pub fn temp_dir() -> TempDir {
        TempDir::new().unwrap()
    }

    #[fixture]
    pub fn sample_spec() -> TestModelSpec {
        TestModelSpec {
            dim: SAMPLE_DIM,
            words: ["</s>", SAMPLE_WORD, "слово", "о", "полку"]
                .iter()
                .map(|w| w.to_string())
                .collect(),
            labels: ["__label__positive", "__label__negative", "__label__neutral"]
                .iter()
                .map(|w| w.to_string())
                .collect(),
            fail_load: false,
            fail_vectors: false,
        }
    }

    /// Sample vectors matching [`sample_spec`].
    pub fn sample_vectors() -> Vec<(&'static str, Vec<f32>)> {
        vec![
            (SAMPLE_WORD, vec![0.5, -0.5, 1.0, 2.0]),
            ("слово", vec![1.0, 1.0, 1.0, 1.0]),
        ]
    }

    /// Handle with the sample model loaded; keep the `TempDir` alive.
    #[fixture]
    pub fn loaded_model(temp_dir: TempDir, sample_spec: TestModelSpec) -> (TempDir, ModelHandle) {
        let path = write_model_file(temp_dir.path(), "sample.bin", &sample_spec);
        let mut model = ModelHandle::with_engine(Box::new(TestEngine::new()));
        model.load_model(&path).unwrap();
        (temp_dir, model)
    }
}
