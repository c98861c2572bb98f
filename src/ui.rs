use crate::config::AppConfig;
use crate::models::Entry;
use crate::schema::MetricField;

pub fn render_index(date: &str, entry: &Entry, config: &AppConfig) -> String {
    let mut page = INDEX_HTML
        .replace("{{DATE}}", date)
        .replace("{{DAYS}}", &config.default_window_days.to_string())
        .replace("{{MAX_DAYS}}", &config.max_window_days.to_string());
    for field in MetricField::ALL {
        let placeholder = format!("{{{{{}}}}}", field.name().to_uppercase());
        page = page.replace(&placeholder, &entry.get(field).to_string());
    }
    page
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Mood Tracker</title>
  <style>
    :root {
      --bg: #f5f3ff;
      --ink: #1f2937;
      --muted: #6b7280;
      --accent: #7c3aed;
      --card: rgba(255, 255, 255, 0.9);
      --shadow: 0 20px 50px rgba(76, 29, 149, 0.15);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: linear-gradient(160deg, var(--bg), #e0f2fe);
      color: var(--ink);
      font-family: "Segoe UI", "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 24px 16px 40px;
    }

    .app {
      width: min(960px, 100%);
      background: var(--card);
      border-radius: 24px;
      box-shadow: var(--shadow);
      padding: 28px;
      display: grid;
      gap: 20px;
    }

    header {
      display: flex;
      justify-content: space-between;
      align-items: baseline;
      flex-wrap: wrap;
      gap: 8px;
    }

    h1 {
      margin: 0;
      font-size: 1.8rem;
    }

    .inputs {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(200px, 1fr));
      gap: 14px;
    }

    .group {
      display: grid;
      gap: 6px;
    }

    .group label {
      font-size: 0.85rem;
      color: var(--muted);
    }

    .buttons {
      display: flex;
      flex-wrap: wrap;
      gap: 6px;
    }

    .buttons button {
      border: 1px solid #d1d5db;
      background: #fff;
      border-radius: 10px;
      padding: 6px 10px;
      cursor: pointer;
    }

    .buttons button.active {
      background: var(--accent);
      border-color: var(--accent);
      color: #fff;
    }

    canvas {
      width: 100%;
      height: 320px;
    }

    .toolbar {
      display: flex;
      flex-wrap: wrap;
      gap: 12px;
      align-items: center;
      font-size: 0.9rem;
    }

    .status {
      min-height: 1.2em;
      font-size: 0.85rem;
      color: var(--muted);
    }

    .status.error {
      color: #dc2626;
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Mood Tracker</h1>
      <span id="today">{{DATE}}</span>
    </header>

    <section class="inputs">
      <div class="group">
        <label>Mood</label>
        <div class="buttons" data-field="mood" data-values="1,2,3,4,5" data-current="{{MOOD}}"></div>
      </div>
      <div class="group">
        <label>Sleep <span id="sleep_hours-value">{{SLEEP_HOURS}}</span>h</label>
        <input type="range" data-field="sleep_hours" min="2" max="16" value="{{SLEEP_HOURS}}" />
      </div>
      <div class="group">
        <label>Creative <span id="creative_hours-value">{{CREATIVE_HOURS}}</span>h</label>
        <input type="range" data-field="creative_hours" min="0" max="10" value="{{CREATIVE_HOURS}}" />
      </div>
      <div class="group">
        <label>Meals</label>
        <div class="buttons" data-field="meal_count" data-values="0,1,2,3,4,5" data-current="{{MEAL_COUNT}}"></div>
      </div>
      <div class="group">
        <label>Exercise (minutes)</label>
        <div class="buttons" data-field="exercise_minutes" data-values="0,15,30,45,60" data-current="{{EXERCISE_MINUTES}}"></div>
      </div>
      <div class="group">
        <label>Medicine</label>
        <div class="buttons" data-field="took_medicine" data-values="0,1" data-current="{{TOOK_MEDICINE}}"></div>
      </div>
      <div class="group">
        <label>Sleep medicine</label>
        <div class="buttons" data-field="took_sleep_medicine" data-values="0,1" data-current="{{TOOK_SLEEP_MEDICINE}}"></div>
      </div>
    </section>

    <section class="toolbar">
      <label>Window: <span id="days-value">{{DAYS}}</span> days</label>
      <input id="days" type="range" min="7" max="{{MAX_DAYS}}" step="7" value="{{DAYS}}" />
      <a href="/api/export">Export</a>
      <label>Import <input id="import" type="file" accept="application/json" /></label>
    </section>

    <canvas id="chart" width="920" height="320"></canvas>
    <div id="status" class="status"></div>
  </main>

  <script>
    const statusEl = document.getElementById('status');
    const daysInput = document.getElementById('days');
    const canvas = document.getElementById('chart');

    const setStatus = (message, tone) => {
      statusEl.textContent = message;
      statusEl.className = tone === 'error' ? 'status error' : 'status';
    };

    const applyEntry = (entry) => {
      document.querySelectorAll('.buttons').forEach((group) => {
        const current = entry[group.dataset.field];
        group.querySelectorAll('button').forEach((button) => {
          button.classList.toggle('active', Number(button.dataset.value) === current);
        });
      });
      document.querySelectorAll('input[type=range][data-field]').forEach((input) => {
        input.value = entry[input.dataset.field];
        document.getElementById(`${input.dataset.field}-value`).textContent = input.value;
      });
    };

    const sendField = async (field, value) => {
      const res = await fetch('/api/field', {
        method: 'POST',
        headers: { 'content-type': 'application/json' },
        body: JSON.stringify({ field, value })
      });
      if (!res.ok) {
        throw new Error((await res.text()) || 'Request failed');
      }
      const body = await res.json();
      applyEntry(body.entry);
      setStatus(body.saved ? 'Saved' : 'Saved in memory only', body.saved ? 'ok' : 'error');
      await loadSeries();
    };

    const drawLine = (ctx, values, max, color, plot) => {
      ctx.strokeStyle = color;
      ctx.lineWidth = 2;
      ctx.beginPath();
      let pen = false;
      values.forEach((value, index) => {
        if (value === null) {
          pen = false;
          return;
        }
        const x = plot.left + plot.step * index + plot.step / 2;
        const y = plot.bottom - (value / max) * plot.height;
        if (pen) {
          ctx.lineTo(x, y);
        } else {
          ctx.moveTo(x, y);
        }
        pen = true;
      });
      ctx.stroke();
    };

    const drawBars = (ctx, values, max, color, slot, plot) => {
      ctx.fillStyle = color;
      values.forEach((value, index) => {
        if (value === null) return;
        const width = plot.step / 4;
        const x = plot.left + plot.step * index + width * slot;
        const height = (value / max) * plot.height;
        ctx.fillRect(x, plot.bottom - height, width, height);
      });
    };

    const render = (data) => {
      const ctx = canvas.getContext('2d');
      ctx.clearRect(0, 0, canvas.width, canvas.height);
      const plot = { left: 30, bottom: canvas.height - 50, height: canvas.height - 80 };
      plot.step = (canvas.width - 60) / data.days;
      const line = (field) => data.series.find((entry) => entry.field === field).values;

      drawBars(ctx, data.meal_scaled, data.shared_axis_max, 'rgba(249, 115, 22, 0.4)', 0.5, plot);
      drawBars(ctx, line('creative_hours'), data.shared_axis_max, 'rgba(139, 92, 246, 0.3)', 1.5, plot);
      drawBars(ctx, data.exercise_scaled, data.shared_axis_max, 'rgba(16, 185, 129, 0.4)', 2.5, plot);
      drawLine(ctx, line('sleep_hours'), data.shared_axis_max, '#0ea5e9', plot);
      drawLine(ctx, line('mood'), 5, '#7c3aed', plot);

      ctx.fillStyle = '#374151';
      ctx.font = '10px sans-serif';
      ctx.textAlign = 'center';
      data.labels.forEach((label, index) => {
        const x = plot.left + plot.step * index + plot.step / 2;
        ctx.fillText(label, x, plot.bottom + 14);
        if (data.medicine_markers[index] === 1) {
          ctx.fillStyle = '#ef4444';
          ctx.fillText('💊', x, plot.bottom + 32);
          ctx.fillStyle = '#374151';
        }
      });
    };

    const loadSeries = async () => {
      const res = await fetch(`/api/series?days=${daysInput.value}`);
      if (!res.ok) {
        throw new Error('Unable to load series');
      }
      render(await res.json());
    };

    document.querySelectorAll('.buttons').forEach((group) => {
      const current = Number(group.dataset.current);
      group.dataset.values.split(',').forEach((value) => {
        const button = document.createElement('button');
        button.type = 'button';
        button.textContent = value;
        button.dataset.value = value;
        button.classList.toggle('active', Number(value) === current);
        button.addEventListener('click', () => {
          sendField(group.dataset.field, Number(value)).catch((err) => setStatus(err.message, 'error'));
        });
        group.appendChild(button);
      });
    });

    document.querySelectorAll('input[type=range][data-field]').forEach((input) => {
      input.addEventListener('change', () => {
        sendField(input.dataset.field, Number(input.value)).catch((err) => setStatus(err.message, 'error'));
      });
      input.addEventListener('input', () => {
        document.getElementById(`${input.dataset.field}-value`).textContent = input.value;
      });
    });

    daysInput.addEventListener('input', () => {
      document.getElementById('days-value').textContent = daysInput.value;
      loadSeries().catch((err) => setStatus(err.message, 'error'));
    });

    document.getElementById('import').addEventListener('change', async (event) => {
      const file = event.target.files?.[0];
      if (!file) return;
      try {
        const res = await fetch('/api/import', { method: 'POST', body: await file.text() });
        if (!res.ok) {
          throw new Error(await res.text());
        }
        const summary = await res.json();
        setStatus(`Imported ${summary.imported} entries`, 'ok');
        applyEntry(await (await fetch('/api/today')).json());
        await loadSeries();
      } catch (err) {
        setStatus(err.message, 'error');
      } finally {
        event.target.value = '';
      }
    });

    loadSeries().catch((err) => setStatus(err.message, 'error'));
  </script>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_fills_every_placeholder() {
        let entry = Entry {
            mood: 4,
            took_sleep_medicine: 1,
            ..Entry::default()
        };
        let page = render_index("2024-01-10", &entry, &AppConfig::default());

        assert!(!page.contains("{{"), "unfilled placeholder");
        assert!(page.contains(r#"data-field="mood" data-values="1,2,3,4,5" data-current="4""#));
        assert!(page.contains(r#"data-field="took_sleep_medicine" data-values="0,1" data-current="1""#));
        assert!(page.contains(r#"max="91""#));
        assert!(page.contains("2024-01-10"));
    }
}
