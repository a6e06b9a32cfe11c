//! Core card data model

pub mod card;

pub use card::{
    ArtworkRef, CanonicalCard, CardKind, CardType, LimitedStatus, MonsterDetails, MonsterStats,
    Pendulum, PrimaryCard, PrimaryDataset, SecondaryCard, SecondaryDataset, SecondaryText,
};
