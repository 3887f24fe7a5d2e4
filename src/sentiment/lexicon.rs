// Valence lexicon backing the sentiment scorer.
//
// Ships with an embedded English lexicon (VADER-style mean valences on
// a -4..4 scale, curated toward news vocabulary). An override file of
// `term<TAB>valence` lines replaces it wholesale; extra tab-separated
// fields per line are ignored, so a full VADER lexicon dump works as-is.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use tracing::info;

/// Embedded valences. Kept alphabetical so diffs stay readable.
const EMBEDDED: &[(&str, f64)] = &[
    ("abandon", -1.9),
    ("abandoned", -2.0),
    ("abuse", -3.2),
    ("abusive", -3.2),
    ("accomplish", 1.8),
    ("accomplished", 1.8),
    ("accuse", -1.6),
    ("accused", -1.6),
    ("achieve", 1.7),
    ("achievement", 2.0),
    ("admire", 2.2),
    ("advance", 1.2),
    ("adversary", -1.1),
    ("afraid", -2.2),
    ("aggression", -2.4),
    ("aggressive", -1.9),
    ("agree", 1.5),
    ("agreement", 1.6),
    ("alarm", -1.4),
    ("alarming", -1.8),
    ("ally", 1.3),
    ("anger", -2.7),
    ("angry", -2.3),
    ("anxious", -1.9),
    ("appalling", -2.9),
    ("applaud", 2.0),
    ("appreciate", 1.9),
    ("approval", 1.7),
    ("approve", 1.7),
    ("arrest", -1.4),
    ("arrested", -1.5),
    ("assault", -3.0),
    ("atrocity", -3.4),
    ("attack", -2.4),
    ("attacked", -2.4),
    ("award", 2.5),
    ("awful", -2.7),
    ("backlash", -1.8),
    ("bad", -2.5),
    ("ban", -1.7),
    ("banned", -1.7),
    ("battle", -1.6),
    ("beautiful", 2.9),
    ("benefit", 1.8),
    ("best", 3.2),
    ("betray", -3.0),
    ("better", 1.9),
    ("blame", -1.9),
    ("bomb", -3.2),
    ("boom", 1.4),
    ("boost", 1.6),
    ("breakthrough", 2.3),
    ("bright", 1.9),
    ("brilliant", 3.0),
    ("broken", -1.6),
    ("brutal", -2.9),
    ("calm", 1.3),
    ("capable", 1.4),
    ("care", 2.0),
    ("careless", -1.5),
    ("casualties", -2.8),
    ("catastrophe", -3.4),
    ("catastrophic", -3.5),
    ("celebrate", 2.7),
    ("celebrated", 2.6),
    ("chaos", -2.6),
    ("cheat", -2.6),
    ("cheer", 2.3),
    ("clash", -1.9),
    ("clean", 1.7),
    ("collapse", -2.4),
    ("comfort", 1.9),
    ("commend", 2.0),
    ("compassion", 2.3),
    ("concern", -1.1),
    ("concerned", -1.2),
    ("condemn", -2.2),
    ("condemned", -2.3),
    ("confidence", 2.0),
    ("confident", 2.1),
    ("conflict", -1.9),
    ("confusion", -1.4),
    ("congratulate", 2.5),
    ("conspiracy", -2.1),
    ("controversial", -1.1),
    ("controversy", -1.3),
    ("corrupt", -3.0),
    ("corruption", -3.1),
    ("courage", 2.4),
    ("crash", -2.3),
    ("crime", -2.5),
    ("criminal", -2.4),
    ("crisis", -2.6),
    ("critical", -1.3),
    ("criticism", -1.6),
    ("criticize", -1.7),
    ("criticized", -1.7),
    ("cruel", -3.1),
    ("damage", -2.0),
    ("danger", -2.4),
    ("dangerous", -2.3),
    ("dead", -3.3),
    ("deadlock", -1.5),
    ("deadly", -2.9),
    ("death", -2.9),
    ("debt", -1.5),
    ("deceive", -2.4),
    ("decline", -1.2),
    ("defeat", -1.9),
    ("deficit", -1.3),
    ("delay", -1.1),
    ("denounce", -2.0),
    ("deny", -1.2),
    ("desperate", -2.1),
    ("destroy", -2.8),
    ("destroyed", -2.8),
    ("destruction", -2.9),
    ("devastate", -3.2),
    ("devastating", -3.3),
    ("die", -3.0),
    ("died", -3.0),
    ("disaster", -3.1),
    ("disastrous", -3.2),
    ("discrimination", -2.6),
    ("disease", -2.1),
    ("dishonest", -2.7),
    ("dismal", -2.3),
    ("dispute", -1.4),
    ("disrupt", -1.5),
    ("distrust", -2.0),
    ("doubt", -1.4),
    ("dread", -2.4),
    ("dream", 1.8),
    ("eager", 1.6),
    ("ease", 1.2),
    ("effective", 1.8),
    ("efficient", 1.9),
    ("embrace", 1.6),
    ("emergency", -2.2),
    ("encourage", 1.9),
    ("encouraging", 2.0),
    ("endorse", 1.6),
    ("enjoy", 2.3),
    ("enthusiasm", 2.3),
    ("escalate", -1.6),
    ("evacuate", -1.8),
    ("excellent", 2.7),
    ("excited", 2.4),
    ("exciting", 2.4),
    ("explosion", -2.6),
    ("fail", -2.3),
    ("failed", -2.3),
    ("failure", -2.5),
    ("fair", 1.6),
    ("faith", 1.9),
    ("fake", -1.9),
    ("famine", -3.0),
    ("fantastic", 2.6),
    ("fatal", -3.1),
    ("fear", -2.2),
    ("fears", -2.1),
    ("fine", 0.8),
    ("fired", -1.9),
    ("flourish", 2.2),
    ("forced", -1.5),
    ("fraud", -2.9),
    ("fraudulent", -2.9),
    ("free", 1.9),
    ("freedom", 2.3),
    ("friendly", 2.2),
    ("frighten", -2.3),
    ("frustration", -2.1),
    ("fun", 2.3),
    ("gain", 1.4),
    ("generous", 2.3),
    ("gentle", 1.9),
    ("glad", 2.0),
    ("gloomy", -1.9),
    ("good", 1.9),
    ("grateful", 2.4),
    ("grave", -1.9),
    ("great", 3.1),
    ("greed", -2.5),
    ("grief", -2.7),
    ("growth", 1.4),
    ("guilty", -2.5),
    ("happy", 2.7),
    ("harm", -2.4),
    ("harmful", -2.4),
    ("harsh", -2.0),
    ("hate", -2.7),
    ("hatred", -3.2),
    ("havoc", -2.4),
    ("heal", 1.9),
    ("healthy", 1.8),
    ("help", 1.7),
    ("helpful", 1.8),
    ("hero", 2.6),
    ("honest", 2.3),
    ("honor", 2.4),
    ("hope", 1.9),
    ("hopeful", 2.1),
    ("hopeless", -2.4),
    ("horrible", -2.5),
    ("horrific", -3.1),
    ("hostage", -2.6),
    ("hostile", -2.3),
    ("humane", 1.9),
    ("humiliate", -2.7),
    ("hurt", -2.4),
    ("illegal", -2.4),
    ("illness", -1.9),
    ("impressive", 2.3),
    ("improve", 1.9),
    ("improved", 1.9),
    ("improvement", 2.0),
    ("incompetent", -2.4),
    ("indict", -1.8),
    ("infection", -1.9),
    ("inflation", -1.3),
    ("injure", -2.2),
    ("injured", -2.3),
    ("innocent", 1.4),
    ("innovation", 1.9),
    ("innovative", 2.1),
    ("insecure", -1.8),
    ("inspire", 2.4),
    ("inspiring", 2.5),
    ("instability", -1.7),
    ("insult", -2.3),
    ("integrity", 2.3),
    ("intimidate", -2.2),
    ("invasion", -2.5),
    ("jail", -2.1),
    ("jeopardy", -2.0),
    ("joy", 2.9),
    ("justice", 2.2),
    ("kill", -3.7),
    ("killed", -3.5),
    ("killing", -3.4),
    ("kind", 2.4),
    ("laud", 2.2),
    ("lawsuit", -1.3),
    ("layoff", -2.0),
    ("layoffs", -2.0),
    ("lie", -2.4),
    ("lies", -2.2),
    ("lose", -1.9),
    ("loss", -1.9),
    ("lost", -1.6),
    ("love", 3.2),
    ("loyal", 2.2),
    ("lucky", 2.4),
    ("mercy", 1.8),
    ("militant", -2.1),
    ("miracle", 2.8),
    ("miserable", -2.7),
    ("misery", -2.9),
    ("misleading", -2.1),
    ("mistake", -1.7),
    ("murder", -3.6),
    ("murdered", -3.5),
    ("neglect", -2.0),
    ("negligence", -2.2),
    ("nervous", -1.7),
    ("nice", 1.8),
    ("notorious", -1.9),
    ("offend", -2.1),
    ("opportunity", 1.7),
    ("optimism", 2.1),
    ("optimistic", 2.2),
    ("outbreak", -2.0),
    ("outrage", -2.7),
    ("outstanding", 2.8),
    ("overcome", 1.6),
    ("pain", -2.5),
    ("painful", -2.5),
    ("panic", -2.4),
    ("peace", 2.5),
    ("peaceful", 2.4),
    ("penalty", -1.5),
    ("perfect", 2.7),
    ("pleasant", 2.2),
    ("pleased", 2.1),
    ("pollution", -1.9),
    ("poor", -2.1),
    ("popular", 1.8),
    ("poverty", -2.5),
    ("praise", 2.4),
    ("praised", 2.4),
    ("pride", 1.9),
    ("prison", -2.2),
    ("problem", -1.6),
    ("problems", -1.7),
    ("profit", 1.6),
    ("progress", 1.8),
    ("promise", 1.3),
    ("promising", 1.9),
    ("prosecute", -1.7),
    ("prosper", 2.3),
    ("prosperity", 2.4),
    ("protect", 1.6),
    ("protest", -1.1),
    ("proud", 2.2),
    ("racism", -3.3),
    ("rebuild", 1.4),
    ("recession", -2.2),
    ("reconcile", 1.6),
    ("recover", 1.5),
    ("recovery", 1.7),
    ("reform", 1.0),
    ("refuse", -1.2),
    ("reject", -1.4),
    ("rejected", -1.5),
    ("relief", 1.9),
    ("remarkable", 2.4),
    ("rescue", 2.0),
    ("resign", -1.2),
    ("respect", 2.1),
    ("restore", 1.4),
    ("revive", 1.4),
    ("reward", 2.2),
    ("rigged", -2.0),
    ("riot", -2.6),
    ("risk", -1.3),
    ("robust", 1.5),
    ("ruin", -2.5),
    ("sad", -2.1),
    ("safe", 1.9),
    ("safety", 1.8),
    ("sanction", -1.5),
    ("sanctions", -1.5),
    ("satisfied", 1.9),
    ("scandal", -2.4),
    ("scare", -2.2),
    ("scared", -2.2),
    ("secure", 1.6),
    ("seize", -1.4),
    ("sentenced", -1.6),
    ("severe", -2.0),
    ("shame", -2.2),
    ("shock", -1.9),
    ("shooting", -3.0),
    ("shortage", -1.7),
    ("shutdown", -1.6),
    ("sick", -2.0),
    ("slam", -1.6),
    ("slump", -1.6),
    ("smart", 2.1),
    ("smile", 2.2),
    ("solution", 1.5),
    ("solve", 1.5),
    ("soothe", 1.6),
    ("sorrow", -2.5),
    ("stable", 1.2),
    ("steal", -2.6),
    ("stolen", -2.4),
    ("strength", 1.9),
    ("strike", -1.1),
    ("strong", 1.7),
    ("struggle", -1.8),
    ("stunning", 2.3),
    ("succeed", 2.2),
    ("success", 2.6),
    ("successful", 2.5),
    ("suffer", -2.6),
    ("suffering", -2.7),
    ("support", 1.6),
    ("supportive", 1.9),
    ("survive", 1.2),
    ("suspicious", -1.7),
    ("sustainable", 1.6),
    ("terrible", -2.7),
    ("terror", -3.2),
    ("terrorism", -3.5),
    ("terrorist", -3.4),
    ("thank", 1.9),
    ("thankful", 2.2),
    ("threat", -2.1),
    ("threaten", -2.2),
    ("threatened", -2.2),
    ("thrive", 2.3),
    ("tragedy", -3.0),
    ("tragic", -3.1),
    ("triumph", 2.7),
    ("trust", 2.1),
    ("truth", 1.6),
    ("turmoil", -2.2),
    ("uncertain", -1.3),
    ("uncertainty", -1.4),
    ("unemployed", -2.1),
    ("unemployment", -2.0),
    ("unfair", -2.2),
    ("unrest", -2.0),
    ("unsafe", -2.0),
    ("unstable", -1.8),
    ("uplifting", 2.4),
    ("upset", -1.9),
    ("urgent", -1.0),
    ("victim", -1.9),
    ("victims", -2.0),
    ("victory", 2.6),
    ("violence", -3.1),
    ("violent", -2.9),
    ("vital", 1.1),
    ("war", -2.9),
    ("warm", 1.6),
    ("warn", -1.2),
    ("warning", -1.4),
    ("weak", -1.8),
    ("wealth", 1.8),
    ("welcome", 1.9),
    ("win", 2.8),
    ("winner", 2.7),
    ("wonderful", 2.7),
    ("worry", -1.9),
    ("worse", -2.1),
    ("worst", -3.1),
    ("worthy", 1.9),
    ("wrong", -1.8),
];

/// Token-to-valence map consulted by the scorer.
pub struct SentimentLexicon {
    valences: HashMap<String, f64>,
}

impl SentimentLexicon {
    /// The built-in lexicon.
    pub fn embedded() -> Self {
        let valences = EMBEDDED
            .iter()
            .map(|&(term, valence)| (term.to_string(), valence))
            .collect();
        Self { valences }
    }

    /// Load a replacement lexicon from a `term<TAB>valence` file.
    ///
    /// Blank lines and `#` comments are skipped. Anything after the
    /// second tab-separated field is ignored.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read sentiment lexicon at {}", path.display()))?;

        let mut valences = HashMap::new();
        for (line_number, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut fields = line.splitn(3, '\t');
            let term = fields.next().unwrap_or_default().trim();
            let raw_valence = fields.next().map(str::trim).unwrap_or_default();
            if term.is_empty() || raw_valence.is_empty() {
                bail!(
                    "Malformed lexicon line {} in {}: expected term<TAB>valence",
                    line_number + 1,
                    path.display()
                );
            }
            let valence: f64 = raw_valence.parse().with_context(|| {
                format!(
                    "Invalid valence {:?} on lexicon line {} in {}",
                    raw_valence,
                    line_number + 1,
                    path.display()
                )
            })?;
            valences.insert(term.to_lowercase(), valence);
        }

        if valences.is_empty() {
            bail!(
                "Sentiment lexicon {} contains no usable entries",
                path.display()
            );
        }

        info!(
            terms = valences.len(),
            path = %path.display(),
            "Loaded sentiment lexicon override"
        );
        Ok(Self { valences })
    }

    pub fn valence(&self, token: &str) -> Option<f64> {
        self.valences.get(token).copied()
    }

    pub fn contains(&self, token: &str) -> bool {
        self.valences.contains_key(token)
    }

    pub fn len(&self) -> usize {
        self.valences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.valences.is_empty()
    }
}
