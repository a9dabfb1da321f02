fn main() {
    // Only the ESP-IDF build needs the sysenv propagated to the linker;
    // host builds (tests, fuzzing) compile without embuild.
    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
