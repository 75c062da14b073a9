//! ssm-env - resolve SSM Parameter Store references in environment
//! variables, then exec a command with the resolved environment.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── output        # Prefixed stderr messages
//! │   └── run           # Resolve, then exec
//! └── core/             # Core library components
//!     ├── template/     # Pattern language (text/template subset)
//!     ├── matcher       # Variable -> parameter name
//!     ├── binding       # Parameter name -> aliased variables
//!     ├── batch         # Size-bounded partitioning
//!     ├── store/        # Parameter store trait
//!     │   ├── memory    # In-memory store
//!     │   └── ssm       # AWS SSM client
//!     ├── resolver      # Strict / tolerant batch resolution
//!     ├── substitute    # Resolved environment
//!     ├── engine        # Plan, then resolve
//!     ├── environ       # Environment snapshot
//!     ├── config        # Flags, TOML file, defaults
//!     └── launch        # Process replacement
//! ```
//!
//! # Example
//!
//! ```
//! use ssm_env::core::constants::DEFAULT_TEMPLATE;
//! use ssm_env::core::engine::{self, Options};
//! use ssm_env::core::environ::{MemoryEnviron, Snapshot};
//! use ssm_env::core::matcher::Matcher;
//! use ssm_env::core::store::MemoryStore;
//!
//! let env = MemoryEnviron::new()
//!     .with("FOO", "ssm://app/secret")
//!     .with("BAR", "plain");
//! let store = MemoryStore::new().with("app/secret", "s3cr3t");
//!
//! let matcher = Matcher::new(DEFAULT_TEMPLATE).unwrap();
//! let plan = engine::plan(&matcher, Snapshot::capture(&env), Options::default()).unwrap();
//! let outcome = plan.resolve(&store).unwrap();
//!
//! assert_eq!(outcome.env.get("FOO"), Some("s3cr3t"));
//! assert_eq!(outcome.env.get("BAR"), Some("plain"));
//! ```

pub mod cli;
pub mod core;
pub mod error;
