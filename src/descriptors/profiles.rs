//! Key profile representation and the classic built-in profiles.
//!
//! A key profile is a sequence of 24 weights: indices 0-11 hold the
//! major-key pitch-class profile, indices 12-23 the minor-key profile.
//! Each 12-wide half is stored normalized so its weights sum to 1.0,
//! which keeps profiles from different sources directly comparable.
//!
//! Profiles are identified by name; the weights live in a
//! [`ProfileRegistry`](crate::descriptors::registry::ProfileRegistry)
//! keyed by that name.

use crate::descriptors::registry::ProfileRegistry;

/// Weight vector for one key profile (major half followed by minor half).
pub type KeyProfile = Vec<f64>;

/// Total length of a key profile.
pub const PROFILE_LEN: usize = 24;

/// Length of one half (major or minor) of a key profile.
pub const HALF_LEN: usize = 12;

/// Normalize a slice of weights in place so they sum to 1.0.
/// Leaves an all-zero slice untouched.
pub fn normalize(weights: &mut [f64]) {
    let total: f64 = weights.iter().sum();
    if total > 0.0 {
        for w in weights.iter_mut() {
            *w /= total;
        }
    }
}

/// The classic key profiles from the key-detection literature, already
/// normalized per half. These seed the initial population so evolution
/// starts from known-good regions of the search space.
pub fn builtin_profiles() -> Vec<(&'static str, KeyProfile)> {
    vec![
        (
            "krumhansl_kessler",
            vec![
                0.15195022732711172,
                0.0533620483369227,
                0.08327351040918879,
                0.05575496530270399,
                0.10480976310122037,
                0.09787030390045463,
                0.06030150753768843,
                0.1241923905240488,
                0.05719071548217276,
                0.08758076094759511,
                0.05479779851639147,
                0.06891600861450106,
                0.14221523253201526,
                0.06021118849696697,
                0.07908335205571781,
                0.12087171422152324,
                0.05841383958660975,
                0.07930802066951245,
                0.05706582790384183,
                0.1067175915524601,
                0.08941810829027184,
                0.06043585711076162,
                0.07503931700741405,
                0.07121995057290496,
            ],
        ),
        (
            "aarden_essen",
            vec![
                0.17766092893562843,
                0.001456239417504233,
                0.1492649402940239,
                0.0016018593592562562,
                0.19804892078043168,
                0.11358695456521818,
                0.002912478835008466,
                0.2206199117520353,
                0.001456239417504233,
                0.08154936738025305,
                0.002329979068008373,
                0.049512180195127924,
                0.18264800547944018,
                0.007376190221285707,
                0.14049900421497014,
                0.16859900505797015,
                0.0070249402107482066,
                0.14436200433086013,
                0.0070249402107482066,
                0.18616100558483017,
                0.04566210136986304,
                0.019318600579558018,
                0.07376190221285707,
                0.017562300526869017,
            ],
        ),
        (
            "sapp",
            vec![
                0.2222222222222222,
                0.0,
                0.1111111111111111,
                0.0,
                0.1111111111111111,
                0.1111111111111111,
                0.0,
                0.2222222222222222,
                0.0,
                0.1111111111111111,
                0.0,
                0.1111111111111111,
                0.2222222222222222,
                0.0,
                0.1111111111111111,
                0.1111111111111111,
                0.0,
                0.1111111111111111,
                0.0,
                0.2222222222222222,
                0.1111111111111111,
                0.0,
                0.05555555555555555,
                0.05555555555555555,
            ],
        ),
        (
            "bellman_budge",
            vec![
                0.168,
                0.0086,
                0.1295,
                0.0141,
                0.1349,
                0.1193,
                0.0125,
                0.2028,
                0.018000000000000002,
                0.0804,
                0.0062,
                0.1057,
                0.1816,
                0.0069,
                0.12990000000000002,
                0.1334,
                0.010700000000000001,
                0.1115,
                0.0138,
                0.2107,
                0.07490000000000001,
                0.015300000000000001,
                0.0092,
                0.10210000000000001,
            ],
        ),
        (
            "temperley",
            vec![
                0.17616580310880825,
                0.014130946773433817,
                0.11493170042392838,
                0.019312293923692884,
                0.15779557230334432,
                0.10833725859632594,
                0.02260951483749411,
                0.16839378238341965,
                0.02449364107395195,
                0.08619877531794629,
                0.013424399434762127,
                0.09420631182289213,
                0.1702127659574468,
                0.020081281377002155,
                0.1133158020559407,
                0.14774085584508725,
                0.011714080803251255,
                0.10996892182644036,
                0.02510160172125269,
                0.1785799665311977,
                0.09658140090843893,
                0.016017212526894576,
                0.03179536218025341,
                0.07889074826679417,
            ],
        ),
    ]
}

/// Insert every built-in profile into `registry` and return their names,
/// in a stable order, for use as the start of an initial population.
pub fn seed_registry(registry: &mut ProfileRegistry) -> Vec<String> {
    let mut names = Vec::new();
    for (name, profile) in builtin_profiles() {
        registry.insert(name, profile);
        names.push(name.to_string());
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_profiles_have_normalized_halves() {
        for (name, profile) in builtin_profiles() {
            assert_eq!(profile.len(), PROFILE_LEN, "{} has wrong length", name);
            let major: f64 = profile[..HALF_LEN].iter().sum();
            let minor: f64 = profile[HALF_LEN..].iter().sum();
            assert!((major - 1.0).abs() < 1e-9, "{} major sums to {}", name, major);
            assert!((minor - 1.0).abs() < 1e-9, "{} minor sums to {}", name, minor);
        }
    }

    #[test]
    fn seed_registry_returns_resolvable_names() {
        let mut registry = ProfileRegistry::new();
        let names = seed_registry(&mut registry);
        assert_eq!(names.len(), 5);
        for name in &names {
            assert!(registry.get(name).is_ok());
        }
    }

    #[test]
    fn normalize_rescales_to_unit_sum() {
        let mut weights = vec![2.0, 0.0, 1.0, 1.0];
        normalize(&mut weights);
        assert!((weights.iter().sum::<f64>() - 1.0).abs() < 1e-12);
        assert_eq!(weights[0], 0.5);
    }

    #[test]
    fn normalize_leaves_zero_slice_alone() {
        let mut weights = vec![0.0; 4];
        normalize(&mut weights);
        assert!(weights.iter().all(|&w| w == 0.0));
    }
}
