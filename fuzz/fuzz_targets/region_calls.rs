#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use sylib_core::{ManualClock, RuntimeConfig, SourceLine, TimingRegistry, WallTime};

#[derive(Arbitrary, Debug)]
enum Call {
    Begin(i32),
    End(i32),
    Work(u64),
}

#[derive(Arbitrary, Debug)]
struct Input {
    checked: bool,
    calls: Vec<Call>,
}

fuzz_target!(|input: Input| {
    let config = if input.checked {
        RuntimeConfig::checked()
    } else {
        RuntimeConfig::default()
    };
    let mut registry =
        TimingRegistry::with_config(config, ManualClock::new(WallTime::from_secs(1)));

    let mut ends = 0usize;
    for call in input.calls {
        match call {
            Call::Begin(line) => registry.begin_region(SourceLine(line)),
            Call::End(line) => {
                registry.end_region(SourceLine(line));
                ends += 1;
            }
            Call::Work(us) => registry.clock().advance_micros(us),
        }
    }

    assert_eq!(registry.cursor(), ends);
    assert_eq!(registry.len(), ends);
    assert!(registry.slots().iter().all(|slot| slot.is_normalized()));
});
