use crate::models::TimerResponse;

pub fn render_index(snapshot: &TimerResponse) -> String {
    INDEX_HTML
        .replace("{{DATE}}", &snapshot.date)
        .replace("{{HOURS}}", &snapshot.hours)
        .replace("{{MINUTES}}", &snapshot.minutes)
        .replace("{{SECONDS}}", &snapshot.seconds)
        .replace("{{PHASE}}", snapshot.phase)
        .replace("{{PROGRESS}}", &format!("{:.2}", snapshot.progress * 100.0))
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Six-Hour Study Challenge</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&family=Fraunces:wght@600&display=swap');

    :root {
      --bg-1: #eef2fb;
      --bg-2: #cdd9f5;
      --ink: #27283d;
      --accent: #5b5bd6;
      --success: #2d7a4b;
      --danger: #c63b2b;
      --muted: #8b8fa3;
      --card: rgba(255, 255, 255, 0.88);
      --shadow: 0 24px 60px rgba(39, 40, 61, 0.16);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #e4ecfa 60%, #f2f4fb 100%);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(960px, 100%);
      background: var(--card);
      backdrop-filter: blur(12px);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 36px;
      display: grid;
      gap: 28px;
    }

    header {
      display: flex;
      flex-direction: column;
      gap: 6px;
      text-align: center;
    }

    h1 {
      font-family: "Fraunces", "Georgia", serif;
      font-weight: 600;
      font-size: clamp(2rem, 4vw, 2.6rem);
      margin: 0;
    }

    .subtitle {
      margin: 0;
      color: var(--muted);
      font-size: 1rem;
    }

    .panels {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(320px, 1fr));
      gap: 24px;
      align-items: stretch;
    }

    .panel {
      background: white;
      border-radius: 20px;
      padding: 24px;
      border: 1px solid rgba(39, 40, 61, 0.08);
      display: flex;
      flex-direction: column;
      gap: 18px;
    }

    .panel h2 {
      margin: 0;
      font-size: 1.2rem;
    }

    .timer-panel {
      align-items: center;
      justify-content: center;
      text-align: center;
    }

    .digits {
      display: flex;
      align-items: baseline;
      justify-content: center;
      gap: 6px;
      font-variant-numeric: tabular-nums;
      font-size: clamp(2.6rem, 8vw, 4.2rem);
      font-weight: 600;
      letter-spacing: 2px;
    }

    .digits .sep {
      color: var(--muted);
    }

    .progress-track {
      width: 100%;
      height: 10px;
      background: #e4e6f0;
      border-radius: 5px;
      overflow: hidden;
    }

    .progress-fill {
      height: 100%;
      width: 0;
      background: linear-gradient(to right, var(--accent), #8f8ff0);
      border-radius: 5px;
      transition: width 400ms ease;
    }

    .status {
      font-size: 1rem;
      min-height: 1.3em;
      color: var(--accent);
    }

    .status[data-phase="completed"] {
      color: var(--success);
    }

    .status[data-phase="paused"] {
      color: var(--muted);
    }

    .today-label {
      font-size: 0.85rem;
      text-transform: uppercase;
      letter-spacing: 0.12em;
      color: var(--muted);
    }

    .cal-header {
      display: flex;
      align-items: center;
      justify-content: space-between;
      gap: 12px;
    }

    .cal-header h2 {
      font-size: 1.1rem;
    }

    .nav-btn {
      appearance: none;
      border: none;
      background: rgba(91, 91, 214, 0.1);
      color: var(--accent);
      width: 36px;
      height: 36px;
      border-radius: 50%;
      font-size: 1.1rem;
      cursor: pointer;
      transition: background 150ms ease;
    }

    .nav-btn:hover {
      background: rgba(91, 91, 214, 0.2);
    }

    .weekdays,
    .grid {
      display: grid;
      grid-template-columns: repeat(7, 1fr);
      gap: 4px;
      text-align: center;
    }

    .weekdays div {
      font-size: 0.8rem;
      font-weight: 600;
      color: var(--muted);
      padding-bottom: 4px;
    }

    .day {
      aspect-ratio: 1;
      display: flex;
      align-items: center;
      justify-content: center;
      border-radius: 50%;
      font-size: 0.9rem;
      min-height: 34px;
    }

    .day.completed {
      background: var(--success);
      color: white;
    }

    .day.failed {
      background: var(--danger);
      color: white;
    }

    .day.today {
      background: var(--accent);
      color: white;
      font-weight: 700;
    }

    .legend {
      display: flex;
      justify-content: center;
      gap: 1.2rem;
      flex-wrap: wrap;
      font-size: 0.85rem;
      color: var(--muted);
    }

    .legend span {
      display: inline-flex;
      align-items: center;
      gap: 6px;
    }

    .dot {
      width: 12px;
      height: 12px;
      border-radius: 50%;
      display: inline-block;
    }

    .dot.today {
      background: var(--accent);
    }

    .dot.completed {
      background: var(--success);
    }

    .dot.failed {
      background: var(--danger);
    }

    @media (max-width: 600px) {
      .app {
        padding: 28px 22px;
      }
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Six-Hour Study Challenge</h1>
      <p class="subtitle">Keep this page open for six hours of focus. One square a day.</p>
    </header>

    <section class="panels">
      <div class="panel timer-panel">
        <span class="today-label" id="today">{{DATE}}</span>
        <div class="digits">
          <span id="hours">{{HOURS}}</span><span class="sep">:</span><span id="minutes">{{MINUTES}}</span><span class="sep">:</span><span id="seconds">{{SECONDS}}</span>
        </div>
        <div class="progress-track">
          <div class="progress-fill" id="progress" style="width: {{PROGRESS}}%"></div>
        </div>
        <div class="status" id="status" data-phase="{{PHASE}}"></div>
      </div>

      <div class="panel">
        <div class="cal-header">
          <button class="nav-btn" id="prev" type="button" aria-label="Previous month">&#8592;</button>
          <h2 id="month-label"></h2>
          <button class="nav-btn" id="next" type="button" aria-label="Next month">&#8594;</button>
        </div>
        <div class="weekdays">
          <div>Sun</div><div>Mon</div><div>Tue</div><div>Wed</div><div>Thu</div><div>Fri</div><div>Sat</div>
        </div>
        <div class="grid" id="grid"></div>
        <div class="legend">
          <span><i class="dot today"></i>Today</span>
          <span><i class="dot completed"></i>Completed</span>
          <span><i class="dot failed"></i>Missed</span>
        </div>
      </div>
    </section>
  </main>

  <script>
    const hoursEl = document.getElementById('hours');
    const minutesEl = document.getElementById('minutes');
    const secondsEl = document.getElementById('seconds');
    const progressEl = document.getElementById('progress');
    const statusEl = document.getElementById('status');
    const todayEl = document.getElementById('today');
    const monthLabelEl = document.getElementById('month-label');
    const gridEl = document.getElementById('grid');
    const prevBtn = document.getElementById('prev');
    const nextBtn = document.getElementById('next');

    const STATUS_TEXT = {
      running: 'Timer running. Keep this page open.',
      paused: 'Timer paused. Come back to this page to continue.',
      completed: 'Congratulations! Today\'s study challenge is complete.'
    };

    let lastPhase = null;
    let cursor = null;

    const updateTimer = (data) => {
      hoursEl.textContent = data.hours;
      minutesEl.textContent = data.minutes;
      secondsEl.textContent = data.seconds;
      todayEl.textContent = data.date;
      progressEl.style.width = `${(data.progress * 100).toFixed(2)}%`;
      statusEl.textContent = STATUS_TEXT[data.phase] || '';
      statusEl.dataset.phase = data.phase;

      if (lastPhase !== null && lastPhase !== 'completed' && data.phase === 'completed') {
        loadCalendar();
      }
      lastPhase = data.phase;
    };

    const renderCalendar = (data) => {
      cursor = { prev: data.prev, next: data.next };
      monthLabelEl.textContent = data.label;
      gridEl.innerHTML = '';
      for (const cell of data.cells) {
        const el = document.createElement('div');
        el.className = 'day';
        if (cell.date === null) {
          el.classList.add('placeholder');
        } else {
          el.textContent = String(parseInt(cell.date.slice(8), 10));
          if (cell.is_today) el.classList.add('today');
          else if (cell.is_completed) el.classList.add('completed');
          else if (cell.is_failed) el.classList.add('failed');
        }
        gridEl.appendChild(el);
      }
    };

    const loadCalendar = async (target) => {
      const url = target
        ? `/api/calendar?year=${target.year}&month=${target.month}`
        : '/api/calendar';
      const res = await fetch(url);
      if (res.ok) {
        renderCalendar(await res.json());
      }
    };

    const reportVisibility = async (visible) => {
      const res = await fetch('/api/visibility', {
        method: 'POST',
        headers: { 'content-type': 'application/json' },
        body: JSON.stringify({ visible })
      });
      if (res.ok) {
        updateTimer(await res.json());
      }
    };

    const pollTimer = async () => {
      const res = await fetch('/api/timer');
      if (res.ok) {
        updateTimer(await res.json());
      }
    };

    document.addEventListener('visibilitychange', () => reportVisibility(!document.hidden));
    window.addEventListener('blur', () => reportVisibility(false));
    window.addEventListener('focus', () => reportVisibility(true));

    prevBtn.addEventListener('click', () => cursor && loadCalendar(cursor.prev));
    nextBtn.addEventListener('click', () => cursor && loadCalendar(cursor.next));

    setInterval(() => pollTimer().catch(() => {}), 1000);

    reportVisibility(!document.hidden).catch(() => {});
    loadCalendar().catch(() => {});
  </script>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_substitutes_initial_snapshot() {
        let snapshot = TimerResponse {
            date: "2026-08-07".to_string(),
            phase: "paused",
            remaining_seconds: 21600,
            elapsed_seconds: 0,
            hours: "06".to_string(),
            minutes: "00".to_string(),
            seconds: "00".to_string(),
            progress: 0.0,
        };

        let page = render_index(&snapshot);
        assert!(page.contains("2026-08-07"));
        assert!(page.contains(">06</span>"));
        assert!(page.contains("data-phase=\"paused\""));
        assert!(page.contains("width: 0.00%"));
        assert!(!page.contains("{{"));
    }
}
