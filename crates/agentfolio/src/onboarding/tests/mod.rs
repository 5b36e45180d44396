mod common;
mod prefill;
mod transitions;
