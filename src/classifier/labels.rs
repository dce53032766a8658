/// Output order of the trained classifier. Index `i` of every distribution
/// the model returns belongs to `CLASS_LABELS[i]`; reordering this list
/// without retraining silently mislabels every prediction.
pub const CLASS_LABELS: [&str; 8] = [
    "Cellulitis",
    "Impetigo",
    "Athlete's Foot",
    "Nail Fungus",
    "Ringworm",
    "Cutaneous Larva Migrans",
    "Chickenpox",
    "Shingles",
];

pub const NUM_CLASSES: usize = CLASS_LABELS.len();
