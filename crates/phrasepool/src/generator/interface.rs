/// A minimal interface for producing random phrases.
///
/// Generation is infallible: any precondition (such as non-empty word
/// categories) must be enforced when the generator is constructed.
pub trait PhraseGenerator {
    /// Returns a freshly composed phrase. Successive calls may repeat.
    fn generate(&self) -> String;
}

impl<G: PhraseGenerator + ?Sized> PhraseGenerator for &G {
    fn generate(&self) -> String {
        (**self).generate()
    }
}

impl<G: PhraseGenerator + ?Sized> PhraseGenerator for std::sync::Arc<G> {
    fn generate(&self) -> String {
        (**self).generate()
    }
}
