//! Build-time catalog of platforms, tools and tutorials.
//!
//! Everything here is `'static` and read-only. Resources are identified
//! within their platform by title; see [`duplicate_resource_titles`].

use chrono::TimeDelta;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

impl Difficulty {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Beginner => "Beginner",
            Self::Intermediate => "Intermediate",
            Self::Advanced => "Advanced",
            Self::Expert => "Expert",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub title: &'static str,
    pub description: &'static str,
    pub link: &'static str,
    pub difficulty: Difficulty,
    pub estimated_time: &'static str,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Platform {
    pub id: &'static str,
    pub name: &'static str,
    pub icon: &'static str,
    pub category: &'static str,
    pub description: &'static str,
    pub main_link: &'static str,
    pub resources: &'static [Resource],
}

impl Platform {
    pub fn total_resources(&self) -> usize {
        self.resources.len()
    }

    pub fn find_resource(&self, title: &str) -> Option<&'static Resource> {
        self.resources.iter().find(|resource| resource.title == title)
    }

    fn matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle) || self.category.to_lowercase().contains(needle)
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Tool {
    pub id: &'static str,
    pub name: &'static str,
    pub icon: &'static str,
    pub category: &'static str,
    pub description: &'static str,
    pub link: &'static str,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tutorial {
    pub id: u32,
    pub title: &'static str,
    pub platform: &'static str,
    pub icon: &'static str,
    pub duration: &'static str,
    pub description: &'static str,
    pub video_id: &'static str,
}

impl Tutorial {
    /// Parses the `mm:ss` duration label. Malformed labels count as zero.
    pub fn runtime(&self) -> TimeDelta {
        parse_runtime(self.duration).unwrap_or_else(TimeDelta::zero)
    }

    pub fn watch_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.video_id)
    }
}

fn parse_runtime(label: &str) -> Option<TimeDelta> {
    let (minutes, seconds) = label.split_once(':')?;
    let minutes: i64 = minutes.trim().parse().ok()?;
    let seconds: i64 = seconds.trim().parse().ok()?;
    if !(0..60).contains(&seconds) || minutes < 0 {
        return None;
    }
    Some(TimeDelta::minutes(minutes) + TimeDelta::seconds(seconds))
}

pub fn platforms() -> &'static [Platform] {
    PLATFORMS
}

pub fn tools() -> &'static [Tool] {
    TOOLS
}

pub fn tutorials() -> &'static [Tutorial] {
    TUTORIALS
}

pub fn find_platform(id: &str) -> Option<&'static Platform> {
    PLATFORMS.iter().find(|platform| platform.id == id)
}

/// Case-insensitive substring match on name or category, in catalog order.
/// An empty query returns the whole catalog.
pub fn search_platforms(query: &str) -> Vec<&'static Platform> {
    let needle = query.to_lowercase();
    if needle.is_empty() {
        return PLATFORMS.iter().collect();
    }
    PLATFORMS
        .iter()
        .filter(|platform| platform.matches(&needle))
        .collect()
}

pub fn total_tutorial_runtime() -> TimeDelta {
    TUTORIALS
        .iter()
        .fold(TimeDelta::zero(), |total, tutorial| total + tutorial.runtime())
}

/// Platform ids with at least one resource title used twice. Completion is
/// keyed by title, so any entry here would make two resources share a flag.
pub fn duplicate_resource_titles() -> Vec<&'static str> {
    PLATFORMS
        .iter()
        .filter(|platform| {
            let mut seen = BTreeSet::new();
            !platform.resources.iter().all(|resource| seen.insert(resource.title))
        })
        .map(|platform| platform.id)
        .collect()
}

const fn resource(
    title: &'static str,
    description: &'static str,
    link: &'static str,
    difficulty: Difficulty,
    estimated_time: &'static str,
) -> Resource {
    Resource {
        title,
        description,
        link,
        difficulty,
        estimated_time,
    }
}

use Difficulty::{Advanced, Beginner, Intermediate};

static PLATFORMS: &[Platform] = &[
    Platform {
        id: "react",
        name: "React",
        icon: "⚛️",
        category: "Web Development",
        description: "A JavaScript library for building user interfaces with component-based architecture.",
        main_link: "https://react.dev/learn",
        resources: &[
            resource("Getting Started with React", "Install React and create your first component", "https://react.dev", Beginner, "2 hours"),
            resource("Understanding JSX", "Learn the syntax extension for JavaScript", "https://react.dev", Beginner, "1 hour"),
            resource("Components & Props", "Build reusable components with props", "https://react.dev", Beginner, "3 hours"),
            resource("State with useState", "Master React state management basics", "https://react.dev", Beginner, "2 hours"),
        ],
    },
    Platform {
        id: "python",
        name: "Python",
        icon: "🐍",
        category: "Programming Language",
        description: "High-level programming language known for simplicity and versatility.",
        main_link: "https://docs.python.org/3/tutorial/",
        resources: &[
            resource("Python Fundamentals", "Variables, data types, and basic syntax", "https://docs.python.org", Beginner, "3 hours"),
            resource("Control Flow", "If statements, loops, and logic", "https://docs.python.org", Beginner, "2 hours"),
            resource("Data Structures", "Lists, tuples, sets, and dictionaries", "https://docs.python.org", Beginner, "4 hours"),
            resource("Object-Oriented Python", "Classes, inheritance, and polymorphism", "https://docs.python.org", Intermediate, "5 hours"),
        ],
    },
    Platform {
        id: "nodejs",
        name: "Node.js",
        icon: "🟢",
        category: "Backend",
        description: "JavaScript runtime for server-side applications.",
        main_link: "https://nodejs.org/en/learn",
        resources: &[
            resource("Node.js Introduction", "Understanding Node.js ecosystem", "https://nodejs.org", Beginner, "2 hours"),
            resource("Express.js Framework", "Build web servers with Express", "https://expressjs.com", Intermediate, "5 hours"),
            resource("RESTful API Design", "Build scalable REST APIs", "https://nodejs.org", Advanced, "6 hours"),
            resource("Authentication & JWT", "Secure your applications", "https://jwt.io", Advanced, "5 hours"),
        ],
    },
    Platform {
        id: "docker",
        name: "Docker",
        icon: "🐳",
        category: "DevOps",
        description: "Platform for developing and running applications in containers.",
        main_link: "https://docs.docker.com/get-started/",
        resources: &[
            resource("Docker Introduction", "Containerization concepts", "https://docs.docker.com", Beginner, "2 hours"),
            resource("Docker Images", "Understanding and pulling images", "https://docs.docker.com", Beginner, "2 hours"),
            resource("Dockerfile Basics", "Create custom Docker images", "https://docs.docker.com", Intermediate, "4 hours"),
            resource("Docker Compose", "Multi-container applications", "https://docs.docker.com", Intermediate, "5 hours"),
        ],
    },
    Platform {
        id: "mongodb",
        name: "MongoDB",
        icon: "🍃",
        category: "Database",
        description: "NoSQL document database.",
        main_link: "https://www.mongodb.com/docs/manual/",
        resources: &[
            resource("MongoDB Introduction", "NoSQL database concepts", "https://www.mongodb.com", Beginner, "2 hours"),
            resource("CRUD Operations", "Create, read, update, delete documents", "https://www.mongodb.com", Beginner, "4 hours"),
            resource("Aggregation Framework", "Complex data processing", "https://www.mongodb.com", Intermediate, "6 hours"),
            resource("Mongoose ODM", "Object modeling for Node.js", "https://mongoosejs.com", Intermediate, "5 hours"),
        ],
    },
];

static TOOLS: &[Tool] = &[
    Tool { id: "vscode", name: "VS Code", icon: "🚀", category: "Editor", description: "Code editor with extensions", link: "https://code.visualstudio.com" },
    Tool { id: "figma", name: "Figma", icon: "🎨", category: "Design", description: "Collaborative design tool", link: "https://figma.com" },
    Tool { id: "postman", name: "Postman", icon: "📡", category: "API Testing", description: "API development platform", link: "https://postman.com" },
    Tool { id: "git", name: "Git", icon: "📝", category: "Version Control", description: "Version control system", link: "https://git-scm.com" },
];

static TUTORIALS: &[Tutorial] = &[
    Tutorial { id: 1, title: "React Basics", platform: "React", icon: "⚛️", duration: "15:30", description: "Learn React fundamentals", video_id: "dQw4w9WgXcQ" },
    Tutorial { id: 2, title: "JavaScript ES6", platform: "JavaScript", icon: "🟨", duration: "22:45", description: "Master modern JavaScript", video_id: "dQw4w9WgXcQ" },
    Tutorial { id: 3, title: "Python for Beginners", platform: "Python", icon: "🐍", duration: "18:20", description: "Start with Python", video_id: "dQw4w9WgXcQ" },
    Tutorial { id: 4, title: "Node.js API", platform: "Node.js", icon: "🟢", duration: "25:10", description: "Build REST APIs", video_id: "dQw4w9WgXcQ" },
    Tutorial { id: 5, title: "Docker Containers", platform: "Docker", icon: "🐳", duration: "20:00", description: "Containerize your apps", video_id: "dQw4w9WgXcQ" },
    Tutorial { id: 6, title: "MongoDB Basics", platform: "MongoDB", icon: "🍃", duration: "17:35", description: "NoSQL database guide", video_id: "dQw4w9WgXcQ" },
];
