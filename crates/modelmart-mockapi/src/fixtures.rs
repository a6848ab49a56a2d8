//! Seed catalog and identity fixtures.
//!
//! Twelve models across distinct categories, enough for two catalog
//! pages at the default page size, plus the demo identity the auth
//! adapter issues.

use chrono::{DateTime, Utc};
use modelmart_core::domain::{Model, Session, Version};

/// Stable uid of the demo identity.
pub const DEMO_UID: &str = "mock-user-123";

/// Demo account email.
pub const DEMO_EMAIL: &str = "demo@example.com";

/// Demo avatar URL.
pub const DEMO_AVATAR: &str = "https://github.com/shadcn.png";

/// The demo session with the given display name.
#[must_use]
pub fn demo_session(display_name: &str) -> Session {
    Session {
        uid: DEMO_UID.to_string(),
        email: Some(DEMO_EMAIL.to_string()),
        display_name: Some(display_name.to_string()),
        photo_url: Some(DEMO_AVATAR.to_string()),
    }
}

fn published(rfc3339: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(rfc3339)
        .map(|t| t.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}

#[allow(clippy::too_many_arguments)]
fn entry(
    id: &str,
    title: &str,
    description: &str,
    provider: &str,
    tags: &[&str],
    price: f64,
    features: &[&str],
    input_type: &str,
    output_type: &str,
    version: Version,
) -> Model {
    Model {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        provider: provider.to_string(),
        tags: tags.iter().map(ToString::to_string).collect(),
        price,
        image_url: Some(format!(
            "https://images.example.com/models/{id}.jpg"
        )),
        features: features.iter().map(ToString::to_string).collect(),
        input_type: input_type.to_string(),
        output_type: output_type.to_string(),
        versions: vec![version],
        rating: None,
        review_count: None,
        comments: vec![],
    }
}

fn version(id: &str, name: &str, script: &str, created_at: &str) -> Version {
    Version {
        id: id.to_string(),
        name: name.to_string(),
        script: script.to_string(),
        created_at: published(created_at),
    }
}

/// The full seed catalog, in listing order.
#[must_use]
pub fn catalog() -> Vec<Model> {
    vec![
        entry(
            "1",
            "LegalSummarizer Pro",
            "Extracts key clauses, identifies obligations, and summarizes \
             legal documents into plain English. Handles NDAs, employment \
             contracts, and court rulings with high fidelity.",
            "LegalTech AI",
            &["Legal", "NLP", "Summary"],
            0.05,
            &[
                "Plain English summaries of complex legalese",
                "Clause extraction and highlighting",
                "Risk assessment flagging",
                "Support for multiple jurisdictions",
            ],
            "PDF, TXT, DOCX",
            "Summary Text, JSON",
            version(
                "v1-1",
                "v1.2.0-stable",
                "def summarize(text): return 'legal summary'",
                "2024-01-10T10:00:00Z",
            ),
        ),
        entry(
            "2",
            "MediDiagnose Assist",
            "Decision-support system for healthcare professionals. Analyzes \
             symptoms, history, and vitals to rank potential diagnoses by \
             likelihood. Assistance only; not a replacement for judgment.",
            "HealthAI Labs",
            &["Healthcare", "Diagnosis", "Medical"],
            0.1,
            &[
                "Symptom-based differential diagnosis",
                "Drug interaction alerts",
                "Integration with ICD-10 coding",
                "Reference to latest clinical guidelines",
            ],
            "Medical Records, Symptoms CSV",
            "Diagnosis Probability Map",
            version(
                "v1-2",
                "v2.0.4",
                "def diagnose(data): return 'health report'",
                "2024-01-12T08:30:00Z",
            ),
        ),
        entry(
            "3",
            "CodeOptimzr",
            "Intelligent refactoring for Python and JavaScript. Finds \
             bottlenecks, redundant loops, and memory leaks, and suggests \
             refactored blocks with better time and space complexity.",
            "DevTools Inc",
            &["Coding", "Optimization", "Developer Tools"],
            0.02,
            &[
                "Complexity analysis (Big O estimation)",
                "Automated refactoring suggestions",
                "Memory leak detection",
                "Security vulnerability patching",
            ],
            "Python, JS, C++ Files",
            "Refactored Code, PDF Report",
            version(
                "v1-3",
                "v0.9.1-beta",
                "def optimize(code): return 'faster code'",
                "2024-01-15T14:20:00Z",
            ),
        ),
        entry(
            "4",
            "CreativeWriter 3000",
            "Narrative generation for authors and screenwriters. Understands \
             plot arcs, character development, and tone across genres from \
             Sci-Fi to Romance.",
            "Creative AI",
            &["Writing", "Creative", "NLP"],
            0.03,
            &[
                "Plot arc generation",
                "Character dialogue variations",
                "Genre-specific tone adaptation",
                "Long-form story continuation",
            ],
            "Character Prompt, Plot Outline",
            "Creative Narrative",
            version(
                "v1-4",
                "v3.0.0",
                "def write(prompt): return 'novel'",
                "2024-01-16T11:45:00Z",
            ),
        ),
        entry(
            "5",
            "FinForecast Elite",
            "Temporal fusion transformers for market trend prediction. \
             Ingests real-time market data, news sentiment, and historical \
             reports; parses quarterly earnings in seconds.",
            "FinTech Sol",
            &["Finance", "Prediction", "Analytics"],
            0.15,
            &[
                "Real-time sentiment interpretation",
                "Quarterly report parsing",
                "Trend forecasting charts",
                "Portfolio risk assessment",
            ],
            "Market Data (Tickers), JSON",
            "CSV Predictions, Forecast Charts",
            version(
                "v1-5",
                "v1.5.2",
                "def forecast(data): return 'market prediction'",
                "2024-01-18T09:10:00Z",
            ),
        ),
        entry(
            "6",
            "VoiceCloner X",
            "Audio synthesis that builds a full digital voice profile from a \
             few seconds of reference audio, with multi-lingual output and \
             watermarking against misuse.",
            "AudioMagic",
            &["Audio", "TTS", "Cloning"],
            0.08,
            &[
                "Instant voice cloning (3s reference)",
                "Cross-lingual voice transfer",
                "Emotion control (Happy, Sad, Angry)",
                "High-fidelity 48kHz output",
            ],
            "Audio (MP3/WAV/OGG)",
            "Synthesized Audio, Voice Profile",
            version(
                "v1-6",
                "v4.1.0",
                "def clone(audio): return 'voice'",
                "2024-01-19T13:00:00Z",
            ),
        ),
        entry(
            "7",
            "ImageRestorer AI",
            "Restores old, damaged, or low-resolution photographs: scratch \
             removal, colorization, face enhancement, and 4x upscaling via \
             GAN-based reconstruction.",
            "Visionary Tech",
            &["Image", "Restoration", "Computer Vision"],
            0.04,
            &[
                "Scratch and dust removal",
                "Automatic colorization",
                "Face enhancement",
                "4x Super-resolution upscaling",
            ],
            "Image (JPEG, PNG)",
            "Enhanced Image",
            version(
                "v1-7",
                "v2.3.0",
                "def restore(img): return 'better image'",
                "2024-01-20T16:00:00Z",
            ),
        ),
        entry(
            "8",
            "SentimentAnalyze",
            "Real-time monitoring of social media, news, and reviews with \
             granular emotion detection beyond positive/negative, processing \
             thousands of posts per second.",
            "DataSense",
            &["Social Media", "Analytics", "NLP"],
            0.01,
            &[
                "Granular emotion detection",
                "Real-time trend alerts",
                "Competitor sentiment benchmarking",
                "Multi-platform aggregation",
            ],
            "Twitter Handle, URL, Text",
            "Sentiment Heatmap, JSON Report",
            version(
                "v1-8",
                "v1.0.0",
                "def analyze(text): return 'sentiment'",
                "2024-01-21T10:00:00Z",
            ),
        ),
        entry(
            "9",
            "CyberGuard Threat",
            "Proactive threat detection using anomaly detection over network \
             and user behavior. Flags zero-day exploits, insider threats, and \
             subtle exfiltration attempts.",
            "SecurNet",
            &["Security", "Detection", "Cyber"],
            0.12,
            &[
                "Zero-day exploit detection",
                "User behavior analytics (UBA)",
                "Automated incident response",
                "Real-time traffic analysis",
            ],
            "Network Logs (Syslog, PCAP)",
            "Alert Stream, PDF Summary",
            version(
                "v1-9",
                "v0.5.0-dev",
                "def detect(logs): return 'threats'",
                "2024-01-22T14:00:00Z",
            ),
        ),
        entry(
            "10",
            "EduTutor Bot",
            "Personal tutor for K-12 subjects that adapts to the student's \
             pace, using Socratic questioning and progress tracking rather \
             than handing out answers.",
            "EdTech Global",
            &["Education", "Tutoring", "Chatbot"],
            0.02,
            &[
                "Adaptive learning paths",
                "Homework assistance",
                "Concept visualization",
                "Progress tracking dashboard",
            ],
            "Subject Name, Prompt",
            "Interactive Tutorial",
            version(
                "v1-10",
                "v1.1.0",
                "def teach(subject): return 'lesson'",
                "2024-01-23T09:00:00Z",
            ),
        ),
        entry(
            "11",
            "ArchitectDesign Gen",
            "Turns text descriptions and rough sketches into detailed floor \
             plans and 3D mockups, with an understanding of spatial \
             relationships, building codes, and style.",
            "StructAI",
            &["Architecture", "Design", "3D"],
            0.25,
            &[
                "Text-to-3D rendering",
                "Floor plan generation",
                "Style transfer",
                "Lighting simulation",
            ],
            "Sketch (JPG), Text Prompt",
            "OBJ/FBX Files, High-Res Map",
            version(
                "v1-11",
                "v1.0.1",
                "def build(sketch): return '3d model'",
                "2024-01-24T16:00:00Z",
            ),
        ),
        entry(
            "12",
            "MusicComposer Pro",
            "Generates royalty-free background music note-by-note for a \
             given mood, genre, and duration, with control over \
             instrumentation, tempo, and intensity.",
            "SonicWaves",
            &["Music", "Audio", "Generation"],
            0.1,
            &[
                "Genre-specific composition",
                "Adjustable loop duration",
                "Multi-instrument arrangement",
                "MIDI export support",
            ],
            "Genre, BPM, Mood Tags",
            "MIDI, WAV (Streaming)",
            version(
                "v1-12",
                "v5.5.0-pro",
                "def compose(params): return 'music file'",
                "2024-01-25T11:00:00Z",
            ),
        ),
    ]
}

/// Ids of the seed models the demo identity owns.
pub const OWNED_MODEL_IDS: [&str; 2] = ["1", "3"];
