//! Built-in metric definition table.
//!
//! Entries are data: raw counter keys, identities, and the sub-series
//! attribute mapping per key. Keys follow the runtime registry's
//! `/path/to/counter:unit` convention.

use super::{Identity, Metric};
use crate::convert;
use crate::core::types::KeyValue;

/// The built-in metric catalog, in stable production order.
pub fn all() -> &'static [Metric] {
    ALL
}

static ALL: &[Metric] = &[
    Metric {
        raw_keys: &["/ffi/host-calls:calls"],
        identity: Identity {
            name: "runtime.ffi.host_calls",
            description: "Count of calls made from managed code into native host libraries by the current process.",
            unit: "{call}",
        },
        attributes: &[("/ffi/host-calls:calls", &[])],
        convert: convert::sum_i64,
    },
    Metric {
        raw_keys: &[
            "/cpu/classes/gc/mark/assist:cpu-seconds",
            "/cpu/classes/gc/mark/dedicated:cpu-seconds",
            "/cpu/classes/gc/mark/idle:cpu-seconds",
            "/cpu/classes/gc/pause:cpu-seconds",
            "/cpu/classes/gc/total:cpu-seconds",
            "/cpu/classes/idle:cpu-seconds",
            "/cpu/classes/scavenge/assist:cpu-seconds",
            "/cpu/classes/scavenge/background:cpu-seconds",
            "/cpu/classes/scavenge/total:cpu-seconds",
            "/cpu/classes/total:cpu-seconds",
            "/cpu/classes/user:cpu-seconds",
        ],
        identity: Identity {
            name: "runtime.cpu.usage",
            description: "Estimated CPU time usage by class. This metric is an overestimate and not directly comparable to system CPU time measurements; compare only with other runtime.cpu.usage values.",
            unit: "s{cpu}",
        },
        attributes: &[
            (
                "/cpu/classes/gc/mark/assist:cpu-seconds",
                &[KeyValue::new("class", "gc.mark.assist")],
            ),
            (
                "/cpu/classes/gc/mark/dedicated:cpu-seconds",
                &[KeyValue::new("class", "gc.mark.dedicated")],
            ),
            (
                "/cpu/classes/gc/mark/idle:cpu-seconds",
                &[KeyValue::new("class", "gc.mark.idle")],
            ),
            (
                "/cpu/classes/gc/pause:cpu-seconds",
                &[KeyValue::new("class", "gc.pause")],
            ),
            (
                "/cpu/classes/gc/total:cpu-seconds",
                &[KeyValue::new("class", "gc.total")],
            ),
            (
                "/cpu/classes/idle:cpu-seconds",
                &[KeyValue::new("class", "idle")],
            ),
            (
                "/cpu/classes/scavenge/assist:cpu-seconds",
                &[KeyValue::new("class", "scavenge.assist")],
            ),
            (
                "/cpu/classes/scavenge/background:cpu-seconds",
                &[KeyValue::new("class", "scavenge.background")],
            ),
            (
                "/cpu/classes/scavenge/total:cpu-seconds",
                &[KeyValue::new("class", "scavenge.total")],
            ),
            (
                "/cpu/classes/total:cpu-seconds",
                &[KeyValue::new("class", "total")],
            ),
            (
                "/cpu/classes/user:cpu-seconds",
                &[KeyValue::new("class", "user")],
            ),
        ],
        convert: convert::sum_f64,
    },
    Metric {
        raw_keys: &[
            "/gc/cycles/automatic:gc-cycles",
            "/gc/cycles/forced:gc-cycles",
            "/gc/cycles/total:gc-cycles",
        ],
        identity: Identity {
            name: "runtime.gc.cycles",
            description: "Count of completed collection cycles.",
            unit: "{cycle}",
        },
        attributes: &[
            (
                "/gc/cycles/automatic:gc-cycles",
                &[KeyValue::new("trigger", "automatic")],
            ),
            (
                "/gc/cycles/forced:gc-cycles",
                &[KeyValue::new("trigger", "forced")],
            ),
            ("/gc/cycles/total:gc-cycles", &[]),
        ],
        convert: convert::sum_i64,
    },
    Metric {
        raw_keys: &["/gc/heap-goal:percent"],
        identity: Identity {
            name: "runtime.gc.heap_goal",
            description: "Heap growth target percentage configured for the collector, otherwise 100.",
            unit: "%",
        },
        attributes: &[("/gc/heap-goal:percent", &[])],
        convert: convert::gauge_i64,
    },
    Metric {
        raw_keys: &["/memory/limit:bytes"],
        identity: Identity {
            name: "runtime.memory.limit",
            description: "Memory limit configured for the runtime, otherwise the maximum representable value.",
            unit: "By",
        },
        attributes: &[("/memory/limit:bytes", &[])],
        convert: convert::gauge_i64,
    },
    Metric {
        raw_keys: &["/memory/heap/allocs-by-size:bytes"],
        identity: Identity {
            name: "runtime.heap.allocs",
            description: "Distribution of heap allocations by approximate size. Bucket counts increase monotonically.",
            unit: "By",
        },
        attributes: &[("/memory/heap/allocs-by-size:bytes", &[])],
        convert: convert::histogram,
    },
];
