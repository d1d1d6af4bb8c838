mod integration {
    mod pipeline {

        extern crate jmxplot;
        extern crate tempdir;

        use self::jmxplot::metric::Report;
        use self::jmxplot::pipeline::{run, Error};
        use self::jmxplot::rate;
        use self::jmxplot::sink::{Csv, CsvConfig, Plot, PlotConfig, Sink};
        use self::jmxplot::source;
        use self::tempdir::TempDir;
        use std::cell::RefCell;
        use std::fs;
        use std::io::{self, Read, Write};
        use std::path::Path;
        use std::rc::Rc;

        struct Recorder {
            reports: Rc<RefCell<Vec<Report>>>,
        }

        impl Sink for Recorder {
            fn name(&self) -> &str {
                "recorder"
            }

            fn deliver(&mut self, report: &Report) -> io::Result<()> {
                self.reports.borrow_mut().push(report.clone());
                Ok(())
            }
        }

        fn dump(dir: &Path, epoch: i64, pairs: &[(&str, &str)]) {
            let mut fp = fs::File::create(dir.join(epoch.to_string())).unwrap();
            writeln!(fp, "{{").unwrap();
            writeln!(fp, "  \"beans\" : [ {{").unwrap();
            writeln!(fp, "    \"name\" : \"java.lang:type=Threading\",").unwrap();
            for &(k, v) in pairs {
                writeln!(fp, "    \"{}\" : {},", k, v).unwrap();
            }
            writeln!(fp, "  }} ]").unwrap();
            writeln!(fp, "}}").unwrap();
        }

        fn pattern(dir: &TempDir) -> String {
            format!("{}/*", dir.path().display())
        }

        #[test]
        fn test_counter_and_rate_to_csv() {
            let dir = TempDir::new("pipeline").unwrap();
            dump(dir.path(), 1020, &[("Count", "140"), ("Load", "0.25")]);
            dump(dir.path(), 1000, &[("Count", "100"), ("Load", "0.5")]);
            dump(dir.path(), 1010, &[("Count", "150"), ("Load", "0.75")]);
            let out = dir.path().join("out.csv");

            let mut sinks: Vec<Box<dyn Sink>> = vec![Box::new(Csv::new(CsvConfig {
                path: out.clone(),
            }))];
            let report = run(
                &pattern(&dir),
                &["Count:counter", "Load:rate"],
                &mut sinks,
            ).unwrap();

            assert_eq!(vec![1000, 1010, 1020], report.timeline.as_slice().to_vec());
            assert_eq!(vec![0.0, 5.0, 0.0], report.series[0].derived_values());
            assert_eq!(vec![0.5, 0.75, 0.25], report.series[1].derived_values());

            let mut csv = String::new();
            fs::File::open(&out)
                .unwrap()
                .read_to_string(&mut csv)
                .unwrap();
            assert_eq!(
                "Seconds Elapsed, Count, Load\n0,0,0.5\n10,5,0.75\n20,0,0.25\n",
                csv
            );
        }

        #[test]
        fn test_compound_counter_with_thousands_separators() {
            let dir = TempDir::new("pipeline").unwrap();
            dump(dir.path(), 1000, &[("a", "1,000"), ("b", "2,000")]);
            dump(dir.path(), 1010, &[("a", "1,500"), ("b", "3,000")]);

            let reports = Rc::new(RefCell::new(Vec::new()));
            let mut sinks: Vec<Box<dyn Sink>> = vec![Box::new(Recorder {
                reports: reports.clone(),
            })];
            run(&pattern(&dir), &["a+b:counter"], &mut sinks).unwrap();

            let reports = reports.borrow();
            assert_eq!(1, reports.len());
            assert_eq!(vec![3000.0, 4500.0], reports[0].series[0].raw_values());
            assert_eq!(vec![0.0, 150.0], reports[0].series[0].derived_values());
        }

        #[test]
        fn test_incomplete_snapshot_is_dropped() {
            let dir = TempDir::new("pipeline").unwrap();
            dump(dir.path(), 1000, &[("fst", "1"), ("snd", "1")]);
            dump(dir.path(), 1010, &[("fst", "2")]);
            dump(dir.path(), 1020, &[("fst", "3"), ("snd", "3")]);

            let mut sinks: Vec<Box<dyn Sink>> = Vec::new();
            let report =
                run(&pattern(&dir), &["fst:rate", "snd:rate"], &mut sinks).unwrap();

            assert_eq!(vec![1000, 1020], report.timeline.as_slice().to_vec());
            for series in &report.series {
                assert_eq!(2, series.raw_values().len());
                assert_eq!(2, series.derived_values().len());
            }
        }

        #[test]
        fn test_snapshot_with_invalid_utf8_is_scanned() {
            let dir = TempDir::new("pipeline").unwrap();
            for &(epoch, value) in &[(1000, "1"), (1010, "2")] {
                let mut fp = fs::File::create(dir.path().join(epoch.to_string())).unwrap();
                fp.write_all(b"\"desc\" : \"caf\xe9\",\n").unwrap();
                writeln!(fp, "\"fst\" : {},", value).unwrap();
            }

            let mut sinks: Vec<Box<dyn Sink>> = Vec::new();
            let report = run(&pattern(&dir), &["fst:rate"], &mut sinks).unwrap();

            assert_eq!(vec![1000, 1010], report.timeline.as_slice().to_vec());
            assert_eq!(vec![1.0, 2.0], report.series[0].derived_values());
        }

        #[test]
        fn test_plot_with_two_metrics_is_skipped() {
            let dir = TempDir::new("pipeline").unwrap();
            dump(dir.path(), 1000, &[("fst", "1"), ("snd", "1")]);
            dump(dir.path(), 1010, &[("fst", "2"), ("snd", "2")]);

            let mut sinks: Vec<Box<dyn Sink>> =
                vec![Box::new(Plot::new(io::sink(), &PlotConfig::default()))];
            let report = run(&pattern(&dir), &["fst:rate", "snd:counter"], &mut sinks);

            assert!(report.is_ok());
        }

        #[test]
        fn test_invalid_spec_reads_nothing() {
            let mut sinks: Vec<Box<dyn Sink>> = Vec::new();
            match run("/nonexistent/[", &["fst"], &mut sinks) {
                Err(Error::Spec(_)) => {}
                other => panic!("unexpected: {:?}", other),
            }
        }

        #[test]
        fn test_no_snapshots() {
            let dir = TempDir::new("pipeline").unwrap();
            let mut sinks: Vec<Box<dyn Sink>> = Vec::new();

            match run(&pattern(&dir), &["fst:rate"], &mut sinks) {
                Err(Error::NoSnapshots(p)) => assert_eq!(pattern(&dir), p),
                other => panic!("unexpected: {:?}", other),
            }
        }

        #[test]
        fn test_non_epoch_file_name() {
            let dir = TempDir::new("pipeline").unwrap();
            dump(dir.path(), 1000, &[("fst", "1")]);
            fs::File::create(dir.path().join("README")).unwrap();
            let mut sinks: Vec<Box<dyn Sink>> = Vec::new();

            match run(&pattern(&dir), &["fst:rate"], &mut sinks) {
                Err(Error::Source(source::Error::InvalidTimestamp(_))) => {}
                other => panic!("unexpected: {:?}", other),
            }
        }

        #[test]
        fn test_shared_epoch_is_degenerate() {
            let dir = TempDir::new("pipeline").unwrap();
            let other = dir.path().join("other");
            fs::create_dir(&other).unwrap();
            dump(dir.path(), 1000, &[("fst", "1")]);
            dump(&other, 1000, &[("fst", "2")]);
            let mut sinks: Vec<Box<dyn Sink>> = Vec::new();

            let pattern = format!("{}/**/1000", dir.path().display());
            match run(&pattern, &["fst:counter"], &mut sinks) {
                Err(Error::Rate(rate::Error::DegenerateInterval { index: 1, epoch: 1000 })) => {}
                other => panic!("unexpected: {:?}", other),
            }
        }
    }
}
