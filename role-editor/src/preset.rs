//! Role presets
//!
//! Heuristic bundles for common clinical roles. A preset does not know the
//! catalog in advance; it matches whatever permission codes and labels exist
//! by keyword and action. The tables below are product decisions about what
//! each role usually needs. They are deliberately fuzzy and are kept as-is:
//! changing a keyword changes which permissions a preset grants.
//!
//! A preset is the OR of its clauses. A clause matches when its subject test
//! holds AND the permission's action is listed:
//! - [`Clause::Keywords`]: any keyword is a substring of the lower-cased code
//!   or the lower-cased label
//! - [`Clause::Modules`]: any fragment is a substring of the derived module
//!
//! Applying a preset only ever adds to a selection, so repeated or combined
//! application is a plain set union.

use shared::Permission;

const VIEW: &[&str] = &["view"];
const READ_WRITE: &[&str] = &["view", "create", "update"];
const FULL: &[&str] = &["view", "create", "update", "delete"];

/// One match clause of a preset
#[derive(Debug, Clone, Copy)]
pub enum Clause {
    Keywords {
        keywords: &'static [&'static str],
        actions: &'static [&'static str],
    },
    Modules {
        fragments: &'static [&'static str],
        actions: &'static [&'static str],
    },
}

impl Clause {
    /// `code` and `label` arrive lower-cased; module and action are used as
    /// derived so presets and the action toggles classify alike.
    fn matches(&self, perm: &Permission, code: &str, label: &str) -> bool {
        let action = perm.action();
        match *self {
            Self::Keywords { keywords, actions } => {
                actions.contains(&action)
                    && keywords.iter().any(|k| code.contains(k) || label.contains(k))
            }
            Self::Modules { fragments, actions } => {
                let module = perm.module();
                actions.contains(&action) && fragments.iter().any(|f| module.contains(f))
            }
        }
    }
}

/// Named heuristic permission bundle
#[derive(Debug, Clone, Copy)]
pub struct Preset {
    pub key: &'static str,
    pub label: &'static str,
    pub description: &'static str,
    pub clauses: &'static [Clause],
}

impl Preset {
    /// Whether this preset would select `perm`
    pub fn matches(&self, perm: &Permission) -> bool {
        let code = perm.code.to_lowercase();
        let label = perm.label.to_lowercase();
        self.clauses
            .iter()
            .any(|clause| clause.matches(perm, &code, &label))
    }

    /// Matching permissions from `perms`
    pub fn select<'a, I>(&self, perms: I) -> impl Iterator<Item = &'a Permission>
    where
        I: IntoIterator<Item = &'a Permission>,
    {
        let preset = *self;
        perms.into_iter().filter(move |p| preset.matches(p))
    }
}

/// Preset table
pub const PRESETS: &[Preset] = &[
    Preset {
        key: "doctor",
        label: "Doctor",
        description: "Consultations, clinical records, orders and results",
        clauses: &[
            Clause::Keywords {
                keywords: &[
                    "opd",
                    "ipd",
                    "patient",
                    "consult",
                    "prescription",
                    "diagnos",
                    "clinical",
                    "emr",
                    "vital",
                    "appointment",
                    "admission",
                    "discharge",
                ],
                actions: READ_WRITE,
            },
            Clause::Keywords {
                keywords: &["lab", "radiology", "imaging", "result", "report"],
                actions: VIEW,
            },
            Clause::Modules {
                fragments: &["dashboard"],
                actions: VIEW,
            },
        ],
    },
    Preset {
        key: "nurse",
        label: "Nurse",
        description: "Ward care, vitals, medication administration",
        clauses: &[
            Clause::Keywords {
                keywords: &["ipd", "ward", "bed", "vital", "nursing", "medication", "admission"],
                actions: READ_WRITE,
            },
            Clause::Keywords {
                keywords: &["patient", "opd", "prescription", "lab", "result", "appointment"],
                actions: VIEW,
            },
            Clause::Modules {
                fragments: &["dashboard"],
                actions: VIEW,
            },
        ],
    },
    Preset {
        key: "reception",
        label: "Reception",
        description: "Registration, appointments, visits and front-desk billing",
        clauses: &[
            Clause::Keywords {
                keywords: &["patient", "registration", "appointment", "visit", "queue", "token", "opd"],
                actions: READ_WRITE,
            },
            Clause::Keywords {
                keywords: &["billing", "invoice", "payment", "department", "doctor"],
                actions: &["view", "create"],
            },
        ],
    },
    Preset {
        key: "lab",
        label: "Lab Technician",
        description: "Lab and radiology orders, samples and results",
        clauses: &[
            Clause::Keywords {
                keywords: &["lab", "sample", "specimen", "test", "result", "radiology", "imaging"],
                actions: &["view", "create", "update", "esign", "verify"],
            },
            Clause::Keywords {
                keywords: &["patient"],
                actions: VIEW,
            },
        ],
    },
    Preset {
        key: "pharmacy",
        label: "Pharmacist",
        description: "Dispensing, stock and purchasing",
        clauses: &[
            Clause::Keywords {
                keywords: &[
                    "pharmacy",
                    "medicine",
                    "drug",
                    "dispens",
                    "stock",
                    "inventory",
                    "supplier",
                    "purchase",
                ],
                actions: READ_WRITE,
            },
            Clause::Keywords {
                keywords: &["prescription", "patient"],
                actions: VIEW,
            },
            Clause::Keywords {
                keywords: &["billing", "invoice"],
                actions: &["view", "create"],
            },
        ],
    },
    Preset {
        key: "admin",
        label: "Administrator",
        description: "Users, roles, departments and system settings",
        clauses: &[
            Clause::Keywords {
                keywords: &[
                    "user",
                    "role",
                    "permission",
                    "department",
                    "setting",
                    "admin",
                    "audit",
                    "staff",
                ],
                actions: FULL,
            },
            Clause::Modules {
                fragments: &["dashboard", "report"],
                actions: VIEW,
            },
        ],
    },
];

/// Look up a preset by key
pub fn find(key: &str) -> Option<&'static Preset> {
    PRESETS.iter().find(|p| p.key.eq_ignore_ascii_case(key))
}
