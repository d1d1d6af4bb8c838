#[macro_use]
extern crate criterion;

use criterion::Criterion;

extern crate jmxplot;

use jmxplot::accumulator::collect;
use jmxplot::metric::parse_metric_specs;
use jmxplot::protocols::jmx::parse_lines;

const DUMP: &str = "{
  \"beans\" : [ {
    \"name\" : \"java.lang:type=Threading\",
    \"ThreadCount\" : 42,
    \"PeakThreadCount\" : 57,
    \"DaemonThreadCount\" : 30,
    \"TotalStartedThreadCount\" : 1,234,
    \"CurrentThreadCpuTime\" : 123456789,
    \"CurrentThreadUserTime\" : 100000000,
    \"ThreadCpuTimeEnabled\" : true,
    \"ObjectName\" : \"java.lang:type=Threading\"
  }, {
    \"name\" : \"java.lang:type=OperatingSystem\",
    \"SystemLoadAverage\" : 0.57,
    \"ProcessCpuLoad\" : 0.0125,
    \"AvailableProcessors\" : 8
  } ]
}";

fn experiment() {
    let extract = parse_lines(DUMP);
    assert!(!extract.samples.is_empty());
}

fn fold_experiment() {
    let specs = parse_metric_specs(&[
        "ThreadCount:rate",
        "CurrentThreadCpuTime+CurrentThreadUserTime:counter",
        "SystemLoadAverage:rate",
    ]).unwrap();
    let extract = parse_lines(DUMP);
    collect(&specs, &extract.samples);
}

fn benchmark(c: &mut Criterion) {
    c.bench_function("parse_jmx", |b| {
        b.iter(|| experiment());
    });
    c.bench_function("parse_and_collect_jmx", |b| {
        b.iter(|| fold_experiment());
    });
}

criterion_group!(benches, benchmark);
criterion_main!(benches);
